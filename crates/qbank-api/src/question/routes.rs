use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
};
use validator::Validate;

use qbank_db::models::{Lifecycle, NewQuestion, QuestionChanges, QuestionFilter, QuestionOrder};
use qbank_db::repositories::question as question_repo;

use crate::{
    ApiState,
    auth::MaybeAuthUser,
    error::{ApiError, db_write_error},
    pagination::{Page, PageParams},
};

use super::model::{
    CreateQuestion, PatchQuestion, QuestionDetailResponse, QuestionListItem, QuestionListParams,
    QuestionRestoreData, QuestionRestoreResponse, QuestionWriteResponse, UpdateQuestion,
    UsageResponse,
};

/// Create the question routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/questions", get(list_questions))
        .route("/questions", post(create_question))
        .route("/questions/{id}", get(get_question))
        .route("/questions/{id}", put(update_question))
        .route("/questions/{id}", patch(patch_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/{id}/restore", post(restore_question))
        .route("/questions/{id}/increment-usage", post(increment_usage))
}

fn not_found() -> ApiError {
    ApiError::NotFound("Question not found".to_string())
}

/// List questions. Hides soft-deleted rows unless `is_active` is given.
async fn list_questions(
    State(state): State<ApiState>,
    Query(params): Query<QuestionListParams>,
) -> Result<Json<Page<QuestionListItem>>, ApiError> {
    let page = PageParams::resolve(params.page, params.page_size)?;

    let filter = QuestionFilter {
        search: params.search,
        topic_name: params.topic_name,
        difficulty: params.difficulty,
        source: params.source,
        is_active: params.is_active.unwrap_or(true),
        order: QuestionOrder::parse(params.ordering.as_deref()),
        limit: page.limit(),
        offset: page.offset(),
    };

    let (questions, count) = question_repo::list(&state.pool, &filter).await?;
    page.check_bounds(count)?;

    let results = questions.into_iter().map(QuestionListItem::from).collect();
    Ok(Json(page.into_page(count, results)))
}

/// Create a question. Authorship is taken from the caller's token when one
/// is presented.
async fn create_question(
    user: MaybeAuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<CreateQuestion>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let question = question_repo::insert(
        &state.pool,
        &NewQuestion {
            question_text: payload.question_text,
            topic_id: payload.topic,
            difficulty: payload.difficulty,
            author: user.0.map(|u| u.user_id),
        },
    )
    .await
    .map_err(|e| db_write_error(e, "Question"))?;

    Ok((StatusCode::CREATED, Json(QuestionWriteResponse::from(question))))
}

/// Retrieve a question by id, active or not.
async fn get_question(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<QuestionDetailResponse>, ApiError> {
    let question = question_repo::get_detail(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(QuestionDetailResponse::from(question)))
}

async fn update_question(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateQuestion>,
) -> Result<Json<QuestionWriteResponse>, ApiError> {
    payload.validate()?;

    let changes = QuestionChanges {
        question_text: Some(payload.question_text),
        topic_id: Some(payload.topic),
        difficulty: Some(payload.difficulty),
    };

    let question = question_repo::update(&state.pool, id, &changes)
        .await
        .map_err(|e| db_write_error(e, "Question"))?
        .ok_or_else(not_found)?;

    Ok(Json(QuestionWriteResponse::from(question)))
}

async fn patch_question(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<PatchQuestion>,
) -> Result<Json<QuestionWriteResponse>, ApiError> {
    payload.validate()?;

    let changes = QuestionChanges {
        question_text: payload.question_text,
        topic_id: payload.topic,
        difficulty: payload.difficulty,
    };

    let question = question_repo::update(&state.pool, id, &changes)
        .await
        .map_err(|e| db_write_error(e, "Question"))?
        .ok_or_else(not_found)?;

    Ok(Json(QuestionWriteResponse::from(question)))
}

/// Soft delete.
async fn delete_question(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let question = question_repo::get_detail(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    let next = Lifecycle::from_flag(question.is_active).deactivate();
    question_repo::set_active(&state.pool, id, next.is_active())
        .await?
        .ok_or_else(not_found)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Restore a soft-deleted question.
async fn restore_question(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<QuestionRestoreResponse>, ApiError> {
    let question = question_repo::get_detail(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    let next = Lifecycle::from_flag(question.is_active)
        .restore()
        .map_err(|_| ApiError::AlreadyActive("Question is already active".to_string()))?;

    let question = question_repo::set_active(&state.pool, id, next.is_active())
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(QuestionRestoreResponse {
        message: format!(
            "Question '{}' restored successfully",
            question.question_text
        ),
        question: QuestionRestoreData::from(question),
    }))
}

/// Bump the usage counter by one.
async fn increment_usage(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<UsageResponse>, ApiError> {
    let usage_count = question_repo::increment_usage(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(UsageResponse { id, usage_count }))
}
