use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// Soft-delete lifecycle shared by every resource.
///
/// Two states, two transitions: `deactivate` (always permitted) and
/// `restore` (rejected when the record is already active). Records are never
/// physically removed through the standard delete path; the `is_active`
/// column is the sole marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Inactive,
}

/// Rejected `restore` transition on a record that is already active.
#[derive(Debug, Error)]
#[error("already active")]
pub struct AlreadyActive;

impl Lifecycle {
    /// Build the state from the persisted `is_active` flag.
    pub fn from_flag(is_active: bool) -> Self {
        if is_active { Self::Active } else { Self::Inactive }
    }

    /// The persisted flag for this state.
    pub fn is_active(self) -> bool {
        self == Self::Active
    }

    /// Soft delete. Permitted from either state.
    #[must_use]
    pub fn deactivate(self) -> Self {
        Self::Inactive
    }

    /// Bring a soft-deleted record back. Fails on an active record so a
    /// second restore without an intervening delete is rejected cleanly.
    pub fn restore(self) -> Result<Self, AlreadyActive> {
        match self {
            Self::Active => Err(AlreadyActive),
            Self::Inactive => Ok(Self::Active),
        }
    }
}

/// Question difficulty, stored as its numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum Difficulty {
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl Difficulty {
    /// Maximum score a question can contribute to an evaluation.
    pub fn max_score(self) -> i32 {
        self as i32 * 3
    }
}

impl From<Difficulty> for i32 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty as Self
    }
}

impl TryFrom<i32> for Difficulty {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Easy),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Hard),
            other => Err(format!("invalid difficulty: {other} (expected 1, 2 or 3)")),
        }
    }
}

/// Where a question came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum QuestionSource {
    /// Part of the built-in question templates.
    Template,
    /// Entered by an interviewer.
    Manual,
    /// Produced by the question generator.
    Generated,
}

impl QuestionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Manual => "manual",
            Self::Generated => "generated",
        }
    }
}

/// Topic grouping questions on candidate evaluation forms.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Topic {
    /// Unique topic identifier
    pub id: i64,
    /// Topic name (unique, max 100 chars)
    pub name: String,
    /// Topic description, empty when not provided
    pub description: String,
    /// Soft-delete marker
    pub is_active: bool,
    /// When the topic was created
    pub created_at: DateTime<Utc>,
    /// When the topic was last updated
    pub updated_at: DateTime<Utc>,
}

/// Technology stack referenced by evaluation forms.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TechStack {
    pub id: i64,
    /// Stack name (unique, max 100 chars)
    pub name: String,
    pub description: Option<String>,
    /// Soft-delete marker
    pub is_active: bool,
}

/// Interview question as persisted.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    /// Unique question identifier
    pub id: i64,
    /// The question as shown to the interviewer
    pub question_text: String,
    pub difficulty: Difficulty,
    pub source: QuestionSource,
    /// Soft-delete marker
    pub is_active: bool,
    /// Topic this question belongs to (always present)
    pub topic_id: i64,
    /// Author, cleared when the user is removed
    pub question_author: Option<Uuid>,
    /// Times the question was used in an evaluation; never decreases
    /// outside explicit administrative correction
    pub usage_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Question joined with its topic name, as served by list/detail reads.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub id: i64,
    pub question_text: String,
    pub difficulty: Difficulty,
    pub source: QuestionSource,
    pub is_active: bool,
    pub topic_id: i64,
    pub topic_name: String,
    pub question_author: Option<Uuid>,
    pub usage_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a topic.
#[derive(Debug, Clone)]
pub struct NewTopic {
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

/// Partial update of a topic; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct TopicChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Fields accepted when creating a tech stack.
#[derive(Debug, Clone)]
pub struct NewTechStack {
    pub name: String,
    pub description: Option<String>,
}

/// Partial update of a tech stack; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct TechStackChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Fields accepted when creating a question.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question_text: String,
    pub topic_id: i64,
    pub difficulty: Difficulty,
    pub author: Option<Uuid>,
}

/// Partial update of a question; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct QuestionChanges {
    pub question_text: Option<String>,
    pub topic_id: Option<i64>,
    pub difficulty: Option<Difficulty>,
}

/// Whitelisted list orderings for the name/id resources (topics and tech
/// stacks). Unknown `ordering` values fall back to the default name order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameOrder {
    #[default]
    NameAsc,
    NameDesc,
    IdAsc,
    IdDesc,
}

impl NameOrder {
    /// Parse a client `ordering` parameter (`name`, `-name`, `id`, `-id`).
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("name") => Self::NameAsc,
            Some("-name") => Self::NameDesc,
            Some("id") => Self::IdAsc,
            Some("-id") => Self::IdDesc,
            _ => Self::default(),
        }
    }
}

/// Whitelisted list orderings for questions. The default matches the
/// model order: topic, most-used first, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionOrder {
    #[default]
    TopicUsage,
    DifficultyAsc,
    DifficultyDesc,
    UsageAsc,
    UsageDesc,
}

impl QuestionOrder {
    /// Parse a client `ordering` parameter (`difficulty`, `-difficulty`,
    /// `usage_count`, `-usage_count`).
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("difficulty") => Self::DifficultyAsc,
            Some("-difficulty") => Self::DifficultyDesc,
            Some("usage_count") => Self::UsageAsc,
            Some("-usage_count") => Self::UsageDesc,
            _ => Self::default(),
        }
    }
}

/// List filter for topics.
#[derive(Debug, Clone)]
pub struct TopicFilter {
    /// Case-insensitive name substring
    pub search: Option<String>,
    pub is_active: bool,
    pub order: NameOrder,
    pub limit: i64,
    pub offset: i64,
}

/// List filter for tech stacks.
#[derive(Debug, Clone)]
pub struct TechStackFilter {
    /// Case-insensitive name substring
    pub search: Option<String>,
    pub is_active: bool,
    pub order: NameOrder,
    pub limit: i64,
    pub offset: i64,
}

/// List filter for questions.
#[derive(Debug, Clone)]
pub struct QuestionFilter {
    /// Case-insensitive question text substring
    pub search: Option<String>,
    /// Case-insensitive topic name substring
    pub topic_name: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub source: Option<QuestionSource>,
    pub is_active: bool,
    pub order: QuestionOrder,
    pub limit: i64,
    pub offset: i64,
}
