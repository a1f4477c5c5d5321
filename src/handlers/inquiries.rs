//! Inquiry handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::inquiries::{InquiryPayload, InquiryStatusUpdate};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Inquiry;
use crate::policy::{self, Action};

/// Submit an inquiry (any authenticated user)
pub async fn create_inquiry(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<InquiryPayload>, ApiError>,
) -> Result<(StatusCode, Json<Inquiry>), ApiError> {
    policy::require(user.role, Action::SubmitInquiry)?;
    payload.validate()?;

    let inquiry = state.inquiries.create(payload, user.id).await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

/// All inquiries, newest first (admin only)
pub async fn list_inquiries(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Inquiry>>, ApiError> {
    policy::require(user.role, Action::ManageInquiries)?;

    let inquiries = state.inquiries.list().await?;
    Ok(Json(inquiries))
}

/// Update inquiry status and response text (admin only)
pub async fn update_inquiry_status(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    WithRejection(Json(payload), _): WithRejection<Json<InquiryStatusUpdate>, ApiError>,
) -> Result<Json<Inquiry>, ApiError> {
    policy::require(user.role, Action::ManageInquiries)?;

    let inquiry = state.inquiries.update_status(id, payload).await?;
    Ok(Json(inquiry))
}

/// Delete an inquiry (admin only); 404 for an unknown id
pub async fn delete_inquiry(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    policy::require(user.role, Action::ManageInquiries)?;

    state.inquiries.delete(id).await?;
    Ok(Json(json!({ "message": "Inquiry deleted" })))
}
