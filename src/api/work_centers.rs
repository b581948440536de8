//! Work center endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::work_center::{CreateWorkCenter, UpdateWorkCenter, WorkCenter},
};

use super::AuthenticatedUser;

/// List work centers
#[utoipa::path(
    get,
    path = "/work-centers",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Work centers", body = Vec<WorkCenter>)
    )
)]
pub async fn list_work_centers(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<WorkCenter>>> {
    Ok(Json(state.services.work_centers.list().await))
}

/// Get a work center by ID
#[utoipa::path(
    get,
    path = "/work-centers/{id}",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Work center ID")),
    responses(
        (status = 200, description = "Work center", body = WorkCenter),
        (status = 404, description = "Work center not found")
    )
)]
pub async fn get_work_center(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<WorkCenter>> {
    let work_center = state.services.work_centers.get_by_id(&id).await?;
    Ok(Json(work_center))
}

/// Create a work center
#[utoipa::path(
    post,
    path = "/work-centers",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    request_body = CreateWorkCenter,
    responses(
        (status = 201, description = "Work center created", body = WorkCenter),
        (status = 400, description = "Invalid data")
    )
)]
pub async fn create_work_center(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateWorkCenter>,
) -> AppResult<(StatusCode, Json<WorkCenter>)> {
    data.validate()?;
    let work_center = state.services.work_centers.create(&data).await?;
    Ok((StatusCode::CREATED, Json(work_center)))
}

/// Update a work center
#[utoipa::path(
    put,
    path = "/work-centers/{id}",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Work center ID")),
    request_body = UpdateWorkCenter,
    responses(
        (status = 200, description = "Work center updated", body = WorkCenter),
        (status = 404, description = "Work center not found")
    )
)]
pub async fn update_work_center(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
    Json(data): Json<UpdateWorkCenter>,
) -> AppResult<Json<WorkCenter>> {
    data.validate()?;
    let work_center = state.services.work_centers.update(&id, &data).await?;
    Ok(Json(work_center))
}

/// Delete a work center
#[utoipa::path(
    delete,
    path = "/work-centers/{id}",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Work center ID")),
    responses(
        (status = 204, description = "Work center deleted")
    )
)]
pub async fn delete_work_center(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.work_centers.delete(&id).await;
    Ok(StatusCode::NO_CONTENT)
}
