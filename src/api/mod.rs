//! API handlers for the maintenance REST endpoints

pub mod auth;
pub mod departments;
pub mod equipment;
pub mod health;
pub mod openapi;
pub mod reports;
pub mod requests;
pub mod teams;
pub mod users;
pub mod work_centers;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::account::AccountClaims, AppState};

/// Extractor for the authenticated account from the JWT bearer token
pub struct AuthenticatedUser(pub AccountClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = AccountClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origin);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/auth/me", get(auth::me))
        // Equipment
        .route(
            "/equipment",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route(
            "/equipment/:id",
            get(equipment::get_equipment)
                .put(equipment::update_equipment)
                .delete(equipment::delete_equipment),
        )
        .route("/equipment/:id/requests", get(equipment::list_equipment_requests))
        .route("/equipment/:id/details", get(equipment::get_equipment_details))
        // Maintenance requests
        .route(
            "/requests",
            get(requests::list_requests).post(requests::create_request),
        )
        .route("/requests/kanban", get(requests::kanban))
        .route(
            "/requests/:id",
            get(requests::get_request)
                .put(requests::update_request)
                .delete(requests::delete_request),
        )
        .route("/requests/:id/status", put(requests::update_request_status))
        // Teams
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/teams/:id",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/:id", get(users::get_user).put(users::update_user))
        // Departments
        .route(
            "/departments",
            get(departments::list_departments).post(departments::create_department),
        )
        // Work centers
        .route(
            "/work-centers",
            get(work_centers::list_work_centers).post(work_centers::create_work_center),
        )
        .route(
            "/work-centers/:id",
            get(work_centers::get_work_center)
                .put(work_centers::update_work_center)
                .delete(work_centers::delete_work_center),
        )
        // Read models
        .route("/dashboard", get(reports::dashboard))
        .route("/reports", get(reports::reports))
        .route("/calendar", get(reports::calendar))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(AllowOrigin::exact(origin)),
        Err(_) => {
            tracing::warn!(%allowed_origin, "Ignoring invalid CORS origin");
            cors
        }
    }
}
