//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use validator::Validate;

use crate::auth::AuthTokensResponse;
use crate::error::ApiResult;
use crate::middleware::AuthenticatedUser;
use crate::models::{ApiResponse, ProfileResponse};
use crate::state::AppState;

/// Registration request payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Register a new user and issue tokens
pub async fn register(
    State(app_state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AuthTokensResponse>>)> {
    request.validate()?;

    let tokens = app_state
        .auth_service
        .register(&request.full_name, &request.email, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(tokens))))
}

/// Authenticate with email and password
pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<AuthTokensResponse>>> {
    request.validate()?;

    let tokens = app_state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(ApiResponse::ok(tokens)))
}

/// Return the authenticated user's profile
pub async fn me(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<ProfileResponse>>> {
    let profile = app_state.auth_service.get_profile(&user.user_id).await?;

    Ok(Json(ApiResponse::ok(profile.into())))
}
