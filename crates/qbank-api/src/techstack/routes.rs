use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
};
use validator::Validate;

use qbank_db::models::{Lifecycle, NameOrder, NewTechStack, TechStackChanges, TechStackFilter};
use qbank_db::repositories::techstack as techstack_repo;

use crate::{
    ApiState,
    auth::AdminUser,
    error::{ApiError, db_write_error},
    pagination::{Page, PageParams},
};

use super::model::{
    CreateTechStack, PatchTechStack, TechStackListItem, TechStackListParams, TechStackResponse,
    TechStackRestoreData, TechStackRestoreResponse, UpdateTechStack,
};

/// Create the tech stack routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/techstacks", get(list_techstacks))
        .route("/techstacks", post(create_techstack))
        .route("/techstacks/{id}", get(get_techstack))
        .route("/techstacks/{id}", put(update_techstack))
        .route("/techstacks/{id}", patch(patch_techstack))
        .route("/techstacks/{id}", delete(delete_techstack))
        .route("/techstacks/{id}/restore", post(restore_techstack))
}

fn not_found() -> ApiError {
    ApiError::NotFound("Tech stack not found".to_string())
}

/// List tech stacks. Hides soft-deleted rows unless `is_active` is given.
async fn list_techstacks(
    State(state): State<ApiState>,
    Query(params): Query<TechStackListParams>,
) -> Result<Json<Page<TechStackListItem>>, ApiError> {
    let page = PageParams::resolve(params.page, params.page_size)?;

    let filter = TechStackFilter {
        search: params.search,
        is_active: params.is_active.unwrap_or(true),
        order: NameOrder::parse(params.ordering.as_deref()),
        limit: page.limit(),
        offset: page.offset(),
    };

    let (stacks, count) = techstack_repo::list(&state.pool, &filter).await?;
    page.check_bounds(count)?;

    let results = stacks.into_iter().map(TechStackListItem::from).collect();
    Ok(Json(page.into_page(count, results)))
}

async fn create_techstack(
    State(state): State<ApiState>,
    Json(payload): Json<CreateTechStack>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let stack = techstack_repo::insert(
        &state.pool,
        &NewTechStack {
            name: payload.name,
            description: payload.description,
        },
    )
    .await
    .map_err(|e| db_write_error(e, "Tech stack"))?;

    Ok((StatusCode::CREATED, Json(TechStackResponse::from(stack))))
}

/// Retrieve a tech stack by id, active or not.
async fn get_techstack(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<TechStackResponse>, ApiError> {
    let stack = techstack_repo::get(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(TechStackResponse::from(stack)))
}

async fn update_techstack(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTechStack>,
) -> Result<Json<TechStackResponse>, ApiError> {
    payload.validate()?;

    let changes = TechStackChanges {
        name: Some(payload.name),
        description: payload.description,
    };

    let stack = techstack_repo::update(&state.pool, id, &changes)
        .await
        .map_err(|e| db_write_error(e, "Tech stack"))?
        .ok_or_else(not_found)?;

    Ok(Json(TechStackResponse::from(stack)))
}

async fn patch_techstack(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<PatchTechStack>,
) -> Result<Json<TechStackResponse>, ApiError> {
    payload.validate()?;

    let changes = TechStackChanges {
        name: payload.name,
        description: payload.description,
    };

    let stack = techstack_repo::update(&state.pool, id, &changes)
        .await
        .map_err(|e| db_write_error(e, "Tech stack"))?
        .ok_or_else(not_found)?;

    Ok(Json(TechStackResponse::from(stack)))
}

/// Soft delete. Admin only.
async fn delete_techstack(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let stack = techstack_repo::get(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    let next = Lifecycle::from_flag(stack.is_active).deactivate();
    techstack_repo::set_active(&state.pool, id, next.is_active())
        .await?
        .ok_or_else(not_found)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Restore a soft-deleted tech stack. Admin only.
async fn restore_techstack(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<TechStackRestoreResponse>, ApiError> {
    let stack = techstack_repo::get(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    let next = Lifecycle::from_flag(stack.is_active)
        .restore()
        .map_err(|_| ApiError::AlreadyActive("Tech stack is already active".to_string()))?;

    let stack = techstack_repo::set_active(&state.pool, id, next.is_active())
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(TechStackRestoreResponse {
        message: format!("Tech stack '{}' restored successfully", stack.name),
        techstack: TechStackRestoreData::from(stack),
    }))
}
