//! User handlers

use axum::extract::{Path, State};
use axum::Json;
use axum_extra::extract::WithRejection;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::UserResponse;
use crate::policy::{self, Action};
use crate::users::{RoleUpdateRequest, UpdateProfileRequest};

/// Current principal, sanitized
pub async fn me(AuthenticatedUser(user): AuthenticatedUser) -> Json<UserResponse> {
    Json(user.into())
}

/// Update the caller's own username and/or email
pub async fn update_me(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateProfileRequest>, ApiError>,
) -> Result<Json<UserResponse>, ApiError> {
    payload.validate()?;

    let updated = state.users.update_profile(user.id, payload).await?;
    Ok(Json(updated.into()))
}

/// All users, newest first (admin only)
pub async fn list_users(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    policy::require(user.role, Action::ListUsers)?;

    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Change a user's role (admin only)
pub async fn set_user_role(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    WithRejection(Json(payload), _): WithRejection<Json<RoleUpdateRequest>, ApiError>,
) -> Result<Json<UserResponse>, ApiError> {
    policy::require(user.role, Action::ManageUsers)?;

    let updated = state.users.set_role(id, payload.role).await?;
    Ok(Json(updated.into()))
}
