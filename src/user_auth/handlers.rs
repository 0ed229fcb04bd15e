//! Auth HTTP handlers: register, login, password reset, dashboard

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use super::service::{
    AuthError, AuthResponse, Claims, LoginRequest, RegisterRequest, UpdatePasswordRequest,
};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResponse, ApiResult, created, error_codes, ok};

/// Register a new user
///
/// POST /register
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<i64>),
        (status = 400, description = "Invalid email or missing password"),
        (status = 409, description = "User already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<i64> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    match state.user_auth.register(req).await {
        Ok(user_id) => created(user_id),
        Err(AuthError::EmailTaken) => {
            tracing::warn!("Registration attempt for existing user");
            ApiError::conflict("User already exists").into_err()
        }
        Err(e) => ApiError::internal(e).into_err(),
    }
}

/// Login user
///
/// POST /login
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    match state.user_auth.login(req).await {
        Ok(resp) => ok(resp),
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Login failed: invalid credentials");
            ApiError::unauthorized("Invalid email or password").into_err()
        }
        Err(e) => ApiError::internal(e).into_err(),
    }
}

/// Reset a user's password
///
/// PATCH /update-password
#[utoipa::path(
    patch,
    path = "/update-password",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Invalid email or missing password"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn update_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdatePasswordRequest>,
) -> ApiResult<()> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    match state
        .user_auth
        .update_password(&req.email, &req.password)
        .await
    {
        Ok(()) => ok(()),
        Err(AuthError::UserNotFound) => ApiError::new(
            StatusCode::NOT_FOUND,
            error_codes::USER_NOT_FOUND,
            "User not found",
        )
        .into_err(),
        Err(e) => ApiError::internal(e).into_err(),
    }
}

/// Dashboard response data
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardData {
    pub message: String,
    /// Authenticated user's email (token subject)
    pub user: String,
}

/// Protected dashboard
///
/// GET /dashboard
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Authenticated user info", body = ApiResponse<DashboardData>),
        (status = 401, description = "Invalid or expired token"),
        (status = 403, description = "Missing token")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn dashboard(Extension(claims): Extension<Claims>) -> ApiResult<DashboardData> {
    ok(DashboardData {
        message: "Welcome to the dashboard".to_string(),
        user: claims.sub,
    })
}
