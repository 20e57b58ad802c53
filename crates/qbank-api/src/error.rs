use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Error taxonomy of the HTTP surface. Every failure is returned to the
/// caller synchronously as `{"error": "<reason>"}` with the status below;
/// nothing is retried or swallowed.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Identifier does not resolve to any record, active or not.
    #[error("{0}")]
    NotFound(String),
    /// Missing/malformed fields, name uniqueness, bad enum values.
    #[error("{0}")]
    Validation(String),
    /// Restore requested on a record that is already active.
    #[error("{0}")]
    AlreadyActive(String),
    /// A topic still referenced by questions cannot be deleted.
    #[error("{0}")]
    Referenced(String),
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::AlreadyActive(_) => StatusCode::BAD_REQUEST,
            Self::Referenced(_) => StatusCode::CONFLICT,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Jwt(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Database(e) => {
                tracing::error!("database error: {e}");
                "internal server error".to_string()
            }
            Self::Jwt(e) => {
                tracing::error!("JWT error: {e}");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// Map constraint violations from an insert/update into client errors;
/// anything else stays a database error.
pub fn db_write_error(err: sqlx::Error, resource: &str) -> ApiError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return ApiError::Validation(format!("{resource} with this name already exists"));
        }
        if db.is_foreign_key_violation() {
            return ApiError::Validation("referenced row does not exist".to_string());
        }
    }

    ApiError::Database(err)
}
