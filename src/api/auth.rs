//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::account::{
        AccountInfo, ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse,
        ResetPasswordRequest, SignupRequest,
    },
};

use super::AuthenticatedUser;

/// Register a customer or technician account
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Signup successful", body = MessageResponse),
        (status = 400, description = "Invalid role, weak password or malformed email"),
        (status = 409, description = "Email already exists"),
        (status = 500, description = "Server error")
    )
)]
pub async fn signup(
    State(state): State<crate::AppState>,
    Json(request): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.services.auth.signup(&request).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Signup successful")),
    ))
}

/// Authenticate with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid role or password"),
        (status = 404, description = "Account does not exist"),
        (status = 500, description = "Server error")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, account) = state.services.auth.login(&request).await?;
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        token_type: "Bearer".to_string(),
        account: AccountInfo::from(&account),
    }))
}

/// Request a password reset link
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = "auth",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset link issued", body = MessageResponse),
        (status = 404, description = "Account does not exist"),
        (status = 500, description = "Server error")
    )
)]
pub async fn forgot_password(
    State(state): State<crate::AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.services.auth.forgot_password(&request.email).await?;
    Ok(Json(MessageResponse::new("Password reset link sent to email")))
}

/// Set a new password with a reset token
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    tag = "auth",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Weak password or invalid token"),
        (status = 500, description = "Server error")
    )
)]
pub async fn reset_password(
    State(state): State<crate::AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .auth
        .reset_password(&request.token, &request.password)
        .await?;
    Ok(Json(MessageResponse::new("Password reset successful")))
}

/// Current account
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated account", body = AccountInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<AccountInfo>> {
    let account = state.services.auth.current_account(&claims).await?;
    Ok(Json(AccountInfo::from(&account)))
}
