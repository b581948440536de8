//! Maintenance team endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::team::{CreateTeam, MaintenanceTeam, UpdateTeam},
};

use super::AuthenticatedUser;

/// List teams
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Teams", body = Vec<MaintenanceTeam>)
    )
)]
pub async fn list_teams(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<MaintenanceTeam>>> {
    Ok(Json(state.services.teams.list().await))
}

/// Get a team by ID
#[utoipa::path(
    get,
    path = "/teams/{id}",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team", body = MaintenanceTeam),
        (status = 404, description = "Team not found")
    )
)]
pub async fn get_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<MaintenanceTeam>> {
    let team = state.services.teams.get_by_id(&id).await?;
    Ok(Json(team))
}

/// Create a team
#[utoipa::path(
    post,
    path = "/teams",
    tag = "teams",
    security(("bearer_auth" = [])),
    request_body = CreateTeam,
    responses(
        (status = 201, description = "Team created", body = MaintenanceTeam)
    )
)]
pub async fn create_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateTeam>,
) -> AppResult<(StatusCode, Json<MaintenanceTeam>)> {
    data.validate()?;
    let team = state.services.teams.create(&data).await;
    Ok((StatusCode::CREATED, Json(team)))
}

/// Update a team
#[utoipa::path(
    put,
    path = "/teams/{id}",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Team ID")),
    request_body = UpdateTeam,
    responses(
        (status = 200, description = "Team updated", body = MaintenanceTeam),
        (status = 404, description = "Team not found")
    )
)]
pub async fn update_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
    Json(data): Json<UpdateTeam>,
) -> AppResult<Json<MaintenanceTeam>> {
    data.validate()?;
    let team = state.services.teams.update(&id, &data).await?;
    Ok(Json(team))
}

/// Delete a team
#[utoipa::path(
    delete,
    path = "/teams/{id}",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Team ID")),
    responses(
        (status = 204, description = "Team deleted")
    )
)]
pub async fn delete_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.teams.delete(&id).await;
    Ok(StatusCode::NO_CONTENT)
}
