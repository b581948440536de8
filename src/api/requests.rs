//! Maintenance request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        report::KanbanBoard,
        request::{CreateRequest, MaintenanceRequest, RequestQuery, RequestStatus, UpdateRequest},
    },
};

use super::AuthenticatedUser;

/// Body for moving a request between Kanban columns
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdate {
    pub status: RequestStatus,
}

/// List requests
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(RequestQuery),
    responses(
        (status = 200, description = "Requests", body = Vec<MaintenanceRequest>)
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<RequestQuery>,
) -> AppResult<Json<Vec<MaintenanceRequest>>> {
    Ok(Json(state.services.requests.list(&query).await))
}

/// Requests grouped by status column
#[utoipa::path(
    get,
    path = "/requests/kanban",
    tag = "requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Kanban board", body = KanbanBoard)
    )
)]
pub async fn kanban(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<KanbanBoard>> {
    Ok(Json(state.services.requests.kanban().await))
}

/// Get a request by ID
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request", body = MaintenanceRequest),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<MaintenanceRequest>> {
    let request = state.services.requests.get_by_id(&id).await?;
    Ok(Json(request))
}

/// Create a request.
///
/// Team and technician default to the equipment's; a `scrap` status
/// deactivates the equipment.
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created", body = MaintenanceRequest),
        (status = 400, description = "Invalid data")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<MaintenanceRequest>)> {
    data.validate()?;
    let request = state.services.requests.create(&data).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Partially update a request
#[utoipa::path(
    put,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Request ID")),
    request_body = UpdateRequest,
    responses(
        (status = 200, description = "Request updated", body = MaintenanceRequest),
        (status = 400, description = "Invalid data"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn update_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
    Json(data): Json<UpdateRequest>,
) -> AppResult<Json<MaintenanceRequest>> {
    data.validate()?;
    let request = state.services.requests.update(&id, &data).await?;
    Ok(Json(request))
}

/// Change only the status of a request
#[utoipa::path(
    put,
    path = "/requests/{id}/status",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Request ID")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Request moved", body = MaintenanceRequest),
        (status = 404, description = "Request not found")
    )
)]
pub async fn update_request_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
    Json(data): Json<StatusUpdate>,
) -> AppResult<Json<MaintenanceRequest>> {
    let request = state.services.requests.set_status(&id, data.status).await?;
    Ok(Json(request))
}

/// Delete a request. Equipment is left untouched.
#[utoipa::path(
    delete,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Request ID")),
    responses(
        (status = 204, description = "Request deleted")
    )
)]
pub async fn delete_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.requests.delete(&id).await;
    Ok(StatusCode::NO_CONTENT)
}
