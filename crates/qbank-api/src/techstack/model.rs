use qbank_db::models::TechStack;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters accepted by `GET /techstacks`.
#[derive(Debug, Deserialize)]
pub struct TechStackListParams {
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
pub struct CreateTechStack {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
}

/// Full update. `name` is required; an omitted description keeps its
/// stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTechStack {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
}

/// Partial update; only provided fields change.
#[derive(Debug, Deserialize, Validate)]
pub struct PatchTechStack {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Dropdown-sized list entry with a link to the detail endpoint.
#[derive(Debug, Serialize)]
pub struct TechStackListItem {
    pub id: i64,
    pub name: String,
    pub detail: String,
}

impl From<TechStack> for TechStackListItem {
    fn from(stack: TechStack) -> Self {
        Self {
            detail: format!("/techstacks/{}", stack.id),
            id: stack.id,
            name: stack.name,
        }
    }
}

/// Full representation served by retrieve/create/update.
#[derive(Debug, Serialize)]
pub struct TechStackResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<TechStack> for TechStackResponse {
    fn from(stack: TechStack) -> Self {
        Self {
            id: stack.id,
            name: stack.name,
            description: stack.description,
        }
    }
}

/// Read-only confirmation data echoed by a restore.
#[derive(Debug, Serialize)]
pub struct TechStackRestoreData {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
}

impl From<TechStack> for TechStackRestoreData {
    fn from(stack: TechStack) -> Self {
        Self {
            id: stack.id,
            name: stack.name,
            is_active: stack.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TechStackRestoreResponse {
    pub message: String,
    pub techstack: TechStackRestoreData,
}
