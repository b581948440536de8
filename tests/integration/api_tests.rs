//! API integration tests, driven in-process through the router

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use maintenance_server::{
    api::create_router,
    clock::SystemClock,
    config::AppConfig,
    repository::{Repository, SeedData},
    services::Services,
    AppState,
};

fn app() -> Router {
    let config = AppConfig::default();
    let repository = Repository::with_seed(SeedData::demo().expect("demo seed"));
    let services = Services::new(repository, config.auth.clone(), Arc::new(SystemClock));
    create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

async fn signup_and_login(app: &Router) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({"email": "tech@example.com", "password": "Wrench#2024", "role": "technician"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "tech@example.com", "password": "Wrench#2024", "role": "technician"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("token").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_signup_outcomes() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({"email": "a@example.com", "password": "Abcdefgh!", "role": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid role");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({"email": "a@example.com", "password": "abc", "role": "customer"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Password must contain uppercase, lowercase, special character and be longer than 8 characters"
    );

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({"email": "a@example.com", "password": "Abcdefgh!", "role": "customer"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Signup successful");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({"email": "a@example.com", "password": "Abcdefgh!", "role": "customer"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn test_login_outcomes() {
    let app = app();
    signup_and_login(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "ghost@example.com", "password": "Wrench#2024"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Account does not exist");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "tech@example.com", "password": "Wrench#2024", "role": "customer"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid role");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "tech@example.com", "password": "Wrong#password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid password");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "tech@example.com", "password": "Wrench#2024"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["account"]["role"], "technician");
}

#[tokio::test]
async fn test_forgot_password() {
    let app = app();
    signup_and_login(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/forgot-password",
        None,
        Some(json!({"email": "ghost@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/forgot-password",
        None,
        Some(json!({"email": "tech@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password reset link sent to email");
}

#[tokio::test]
async fn test_store_requires_token() {
    let app = app();
    let (status, _) = send(&app, Method::GET, "/api/equipment", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/equipment", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_overdue_request_cleared_by_repair() {
    let app = app();
    let token = signup_and_login(&app).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/requests",
        Some(&token),
        Some(json!({
            "subject": "Annual inspection",
            "equipmentId": "1",
            "requestType": "preventive",
            "scheduledDate": "2020-01-01T00:00:00Z",
            "status": "new"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["isOverdue"], true);
    assert_eq!(created["equipmentName"], "CNC Machine 01");
    assert_eq!(created["maintenanceTeamId"], "1");

    let id = created["id"].as_str().expect("id");
    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/requests/{}", id),
        Some(&token),
        Some(json!({"status": "repaired"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["isOverdue"], false);
    assert!(updated["completedAt"].is_string());
}

#[tokio::test]
async fn test_scrap_deactivates_equipment() {
    let app = app();
    let token = signup_and_login(&app).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/requests/1/status",
        Some(&token),
        Some(json!({"status": "scrap"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, equipment) = send(&app, Method::GET, "/api/equipment/1", Some(&token), None).await;
    assert_eq!(equipment["isActive"], false);
    assert!(equipment["notes"]
        .as_str()
        .unwrap_or_default()
        .contains("scrapped"));
}

#[tokio::test]
async fn test_delete_request_leaves_equipment() {
    let app = app();
    let token = signup_and_login(&app).await;

    let (_, before) = send(&app, Method::GET, "/api/equipment/3", Some(&token), None).await;

    let (status, _) = send(&app, Method::DELETE, "/api/requests/2", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    // unconditional
    let (status, _) = send(&app, Method::DELETE, "/api/requests/2", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/api/requests/2", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, after) = send(&app, Method::GET, "/api/equipment/3", Some(&token), None).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_read_models() {
    let app = app();
    let token = signup_and_login(&app).await;

    let (status, board) = send(&app, Method::GET, "/api/requests/kanban", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["columns"].as_array().map(Vec::len), Some(4));

    let (status, dashboard) = send(&app, Method::GET, "/api/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["totalEquipment"], 10);

    let (status, details) =
        send(&app, Method::GET, "/api/equipment/1/details", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["teamName"], "Mechanics");
}

#[tokio::test]
async fn test_out_of_range_duration_is_a_bad_request() {
    let app = app();
    let token = signup_and_login(&app).await;
    let (_, before) = send(&app, Method::GET, "/api/calendar", Some(&token), None).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/requests/2",
        Some(&token),
        Some(json!({"duration": -5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/requests",
        Some(&token),
        Some(json!({
            "subject": "Overhaul",
            "equipmentId": "1",
            "requestType": "preventive",
            "scheduledDate": "2025-03-01T00:00:00Z",
            "duration": 1e10
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, after) = send(&app, Method::GET, "/api/calendar", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_login_with_empty_role_skips_role_check() {
    let app = app();
    signup_and_login(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "tech@example.com", "password": "Wrench#2024", "role": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
