use chrono::{DateTime, Utc};
use qbank_db::models::{Difficulty, Question, QuestionDetail, QuestionSource};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Query parameters accepted by `GET /questions`.
#[derive(Debug, Deserialize)]
pub struct QuestionListParams {
    /// Case-insensitive question text substring
    pub search: Option<String>,
    /// Case-insensitive topic name substring
    pub topic_name: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub source: Option<QuestionSource>,
    /// Explicit active-state filter; omitted means active rows only
    pub is_active: Option<bool>,
    /// `difficulty`, `-difficulty`, `usage_count` or `-usage_count`
    pub ordering: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Writable fields. `source` is not writable through this surface and
/// defaults to `template`; authorship comes from the caller's token.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestion {
    #[validate(length(min = 1))]
    pub question_text: String,
    pub topic: i64,
    pub difficulty: Difficulty,
}

/// Full update; every writable field is required.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuestion {
    #[validate(length(min = 1))]
    pub question_text: String,
    pub topic: i64,
    pub difficulty: Difficulty,
}

/// Partial update; only provided fields change.
#[derive(Debug, Deserialize, Validate)]
pub struct PatchQuestion {
    #[validate(length(min = 1))]
    pub question_text: Option<String>,
    pub topic: Option<i64>,
    pub difficulty: Option<Difficulty>,
}

/// Shape returned by create/update: the writable fields plus the id.
#[derive(Debug, Serialize)]
pub struct QuestionWriteResponse {
    pub id: i64,
    pub question_text: String,
    pub topic: i64,
    pub difficulty: Difficulty,
}

impl From<Question> for QuestionWriteResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            question_text: question.question_text,
            topic: question.topic_id,
            difficulty: question.difficulty,
        }
    }
}

/// List entry with the topic name and a link to the detail endpoint.
#[derive(Debug, Serialize)]
pub struct QuestionListItem {
    pub id: i64,
    pub question_text: String,
    pub topic_name: String,
    pub difficulty: Difficulty,
    pub source: QuestionSource,
    pub usage_count: i32,
    pub detail: String,
}

impl From<QuestionDetail> for QuestionListItem {
    fn from(question: QuestionDetail) -> Self {
        Self {
            detail: format!("/questions/{}", question.id),
            id: question.id,
            question_text: question.question_text,
            topic_name: question.topic_name,
            difficulty: question.difficulty,
            source: question.source,
            usage_count: question.usage_count,
        }
    }
}

/// Full representation served by retrieve.
#[derive(Debug, Serialize)]
pub struct QuestionDetailResponse {
    pub id: i64,
    pub question_text: String,
    pub topic_name: String,
    pub difficulty: Difficulty,
    pub source: QuestionSource,
    pub is_active: bool,
    pub usage_count: i32,
    /// Derived: difficulty times three
    pub max_score: i32,
    pub question_author: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<QuestionDetail> for QuestionDetailResponse {
    fn from(question: QuestionDetail) -> Self {
        Self {
            max_score: question.difficulty.max_score(),
            id: question.id,
            question_text: question.question_text,
            topic_name: question.topic_name,
            difficulty: question.difficulty,
            source: question.source,
            is_active: question.is_active,
            usage_count: question.usage_count,
            question_author: question.question_author,
            created_at: question.created_at,
            updated_at: question.updated_at,
        }
    }
}

/// Read-only confirmation data echoed by a restore.
#[derive(Debug, Serialize)]
pub struct QuestionRestoreData {
    pub id: i64,
    pub question_text: String,
    pub is_active: bool,
    pub topic_name: String,
    pub difficulty: Difficulty,
}

impl From<QuestionDetail> for QuestionRestoreData {
    fn from(question: QuestionDetail) -> Self {
        Self {
            id: question.id,
            question_text: question.question_text,
            is_active: question.is_active,
            topic_name: question.topic_name,
            difficulty: question.difficulty,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionRestoreResponse {
    pub message: String,
    pub question: QuestionRestoreData,
}

/// Result of the usage-count increment operation.
#[derive(Debug, Serialize)]
pub struct UsageResponse {
    pub id: i64,
    pub usage_count: i32,
}
