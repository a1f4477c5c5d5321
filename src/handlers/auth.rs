//! Registration and login handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Serialize;
use validator::Validate;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::models::UserResponse;
use crate::users::{LoginRequest, RegisterRequest};

/// Token plus sanitized user, returned by register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.validate()?;

    let user = state.users.register(payload).await?;
    let token = state
        .tokens
        .issue(user.id)
        .map_err(|e| ApiError::Internal(e.into()))?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.validate()?;

    let user = state.users.authenticate(&payload).await?;
    let token = state
        .tokens
        .issue(user.id)
        .map_err(|e| ApiError::Internal(e.into()))?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
