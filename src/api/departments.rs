//! Department endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::department::{CreateDepartment, Department},
};

use super::AuthenticatedUser;

/// List departments
#[utoipa::path(
    get,
    path = "/departments",
    tag = "departments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Departments", body = Vec<Department>)
    )
)]
pub async fn list_departments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Department>>> {
    Ok(Json(state.services.departments.list().await))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/departments",
    tag = "departments",
    security(("bearer_auth" = [])),
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created", body = Department)
    )
)]
pub async fn create_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<Department>)> {
    data.validate()?;
    let department = state.services.departments.create(&data).await;
    Ok((StatusCode::CREATED, Json(department)))
}
