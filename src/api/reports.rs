//! Dashboard, calendar and report endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::report::{CalendarEvent, CalendarQuery, Dashboard, Reports},
};

use super::AuthenticatedUser;

/// Headline figures and most recent requests
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard", body = Dashboard)
    )
)]
pub async fn dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Dashboard>> {
    Ok(Json(state.services.reports.dashboard().await))
}

/// Request breakdowns by team, category, status and type
#[utoipa::path(
    get,
    path = "/reports",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reports", body = Reports)
    )
)]
pub async fn reports(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Reports>> {
    Ok(Json(state.services.reports.reports().await))
}

/// Preventive maintenance calendar
#[utoipa::path(
    get,
    path = "/calendar",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(CalendarQuery),
    responses(
        (status = 200, description = "Calendar events", body = Vec<CalendarEvent>)
    )
)]
pub async fn calendar(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<Vec<CalendarEvent>>> {
    Ok(Json(state.services.requests.calendar(&query).await))
}
