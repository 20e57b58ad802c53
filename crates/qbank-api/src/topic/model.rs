use chrono::{DateTime, Utc};
use qbank_db::models::Topic;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters accepted by `GET /topics`.
#[derive(Debug, Deserialize)]
pub struct TopicListParams {
    /// Case-insensitive name substring
    pub search: Option<String>,
    /// Explicit active-state filter; omitted means active rows only
    pub is_active: Option<bool>,
    /// `name`, `-name`, `id` or `-id`
    pub ordering: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTopic {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Full update. `name` is required; omitted optional fields keep their
/// stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTopic {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Partial update; only provided fields change.
#[derive(Debug, Deserialize, Validate)]
pub struct PatchTopic {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Dropdown-sized list entry with a link to the detail endpoint.
#[derive(Debug, Serialize)]
pub struct TopicListItem {
    pub id: i64,
    pub name: String,
    pub detail: String,
}

impl From<Topic> for TopicListItem {
    fn from(topic: Topic) -> Self {
        Self {
            detail: format!("/topics/{}", topic.id),
            id: topic.id,
            name: topic.name,
        }
    }
}

/// Full representation served by retrieve/create/update.
#[derive(Debug, Serialize)]
pub struct TopicResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Topic> for TopicResponse {
    fn from(topic: Topic) -> Self {
        Self {
            id: topic.id,
            name: topic.name,
            description: topic.description,
            is_active: topic.is_active,
            created_at: topic.created_at,
            updated_at: topic.updated_at,
        }
    }
}

/// Read-only confirmation data echoed by a restore.
#[derive(Debug, Serialize)]
pub struct TopicRestoreData {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub detail: String,
}

impl From<Topic> for TopicRestoreData {
    fn from(topic: Topic) -> Self {
        Self {
            detail: format!("/topics/{}", topic.id),
            id: topic.id,
            name: topic.name,
            is_active: topic.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TopicRestoreResponse {
    pub message: String,
    pub topic: TopicRestoreData,
}
