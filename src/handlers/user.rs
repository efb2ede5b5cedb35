//! Admin user directory handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::middleware::AdminUser;
use crate::models::{ApiResponse, ProfileResponse, UserRole};
use crate::profile::ListUsersQuery;
use crate::state::AppState;

/// Request DTO for the admin role change
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: UserRole,
}

/// List users, optionally filtered by role or search term (admin)
pub async fn list_users(
    AdminUser(_admin): AdminUser,
    State(app_state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Json<ApiResponse<Vec<ProfileResponse>>>> {
    let users = app_state.profile_service.list_users(query).await?;

    let users = users.into_iter().map(ProfileResponse::from).collect();

    Ok(Json(ApiResponse::ok(users)))
}

/// Change a user's role (admin)
pub async fn update_user_role(
    AdminUser(admin): AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRoleRequest>,
) -> ApiResult<Json<ApiResponse<ProfileResponse>>> {
    // An admin demoting themselves would lock them out of this very endpoint
    if id == admin.user_id && request.role == UserRole::User {
        return Err(ApiError::BadRequest(
            "Cannot remove your own admin role".to_string(),
        ));
    }

    let profile = app_state
        .profile_service
        .update_role(&id, request.role)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;

    Ok(Json(ApiResponse::ok(profile.into())))
}
