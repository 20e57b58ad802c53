use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};

use crate::{question, state::ApiState, techstack, topic};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .merge(topic::routes())
        .merge(techstack::routes())
        .merge(question::routes())
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
