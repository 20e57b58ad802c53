use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
};
use validator::Validate;

use qbank_db::models::{Lifecycle, NameOrder, NewTopic, TopicChanges, TopicFilter};
use qbank_db::repositories::{question as question_repo, topic as topic_repo};

use crate::{
    ApiState,
    auth::AdminUser,
    error::{ApiError, db_write_error},
    pagination::{Page, PageParams},
};

use super::model::{
    CreateTopic, PatchTopic, TopicListItem, TopicListParams, TopicResponse, TopicRestoreData,
    TopicRestoreResponse, UpdateTopic,
};

/// Create the topic routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/topics", get(list_topics))
        .route("/topics", post(create_topic))
        .route("/topics/{id}", get(get_topic))
        .route("/topics/{id}", put(update_topic))
        .route("/topics/{id}", patch(patch_topic))
        .route("/topics/{id}", delete(delete_topic))
        .route("/topics/{id}/restore", post(restore_topic))
}

fn not_found() -> ApiError {
    ApiError::NotFound("Topic not found".to_string())
}

/// List topics. Hides soft-deleted rows unless `is_active` is given.
async fn list_topics(
    State(state): State<ApiState>,
    Query(params): Query<TopicListParams>,
) -> Result<Json<Page<TopicListItem>>, ApiError> {
    let page = PageParams::resolve(params.page, params.page_size)?;

    let filter = TopicFilter {
        search: params.search,
        is_active: params.is_active.unwrap_or(true),
        order: NameOrder::parse(params.ordering.as_deref()),
        limit: page.limit(),
        offset: page.offset(),
    };

    let (topics, count) = topic_repo::list(&state.pool, &filter).await?;
    page.check_bounds(count)?;

    let results = topics.into_iter().map(TopicListItem::from).collect();
    Ok(Json(page.into_page(count, results)))
}

async fn create_topic(
    State(state): State<ApiState>,
    Json(payload): Json<CreateTopic>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let topic = topic_repo::insert(
        &state.pool,
        &NewTopic {
            name: payload.name,
            description: payload.description.unwrap_or_default(),
            is_active: payload.is_active.unwrap_or(true),
        },
    )
    .await
    .map_err(|e| db_write_error(e, "Topic"))?;

    Ok((StatusCode::CREATED, Json(TopicResponse::from(topic))))
}

/// Retrieve a topic by id, active or not.
async fn get_topic(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<TopicResponse>, ApiError> {
    let topic = topic_repo::get(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(TopicResponse::from(topic)))
}

async fn update_topic(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTopic>,
) -> Result<Json<TopicResponse>, ApiError> {
    payload.validate()?;

    let changes = TopicChanges {
        name: Some(payload.name),
        description: payload.description,
        is_active: payload.is_active,
    };

    let topic = topic_repo::update(&state.pool, id, &changes)
        .await
        .map_err(|e| db_write_error(e, "Topic"))?
        .ok_or_else(not_found)?;

    Ok(Json(TopicResponse::from(topic)))
}

async fn patch_topic(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<PatchTopic>,
) -> Result<Json<TopicResponse>, ApiError> {
    payload.validate()?;

    let changes = TopicChanges {
        name: payload.name,
        description: payload.description,
        is_active: payload.is_active,
    };

    let topic = topic_repo::update(&state.pool, id, &changes)
        .await
        .map_err(|e| db_write_error(e, "Topic"))?
        .ok_or_else(not_found)?;

    Ok(Json(TopicResponse::from(topic)))
}

/// Soft delete. Admin only; refused while questions still reference the
/// topic.
async fn delete_topic(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let topic = topic_repo::get(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    let references = question_repo::count_for_topic(&state.pool, id).await?;
    if references > 0 {
        return Err(ApiError::Referenced(format!(
            "Topic '{}' is referenced by {references} question(s) and cannot be deleted",
            topic.name
        )));
    }

    let next = Lifecycle::from_flag(topic.is_active).deactivate();
    topic_repo::set_active(&state.pool, id, next.is_active())
        .await?
        .ok_or_else(not_found)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Restore a soft-deleted topic. Admin only.
async fn restore_topic(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<TopicRestoreResponse>, ApiError> {
    let topic = topic_repo::get(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    let next = Lifecycle::from_flag(topic.is_active)
        .restore()
        .map_err(|_| ApiError::AlreadyActive("Topic is already active".to_string()))?;

    let topic = topic_repo::set_active(&state.pool, id, next.is_active())
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(TopicRestoreResponse {
        message: format!("Topic '{}' restored successfully", topic.name),
        topic: TopicRestoreData::from(topic),
    }))
}
