//! Auction handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::auctions::AuctionPayload;
use crate::error::ApiError;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Auction;
use crate::policy::{self, Action};

/// All auctions, newest first (public)
pub async fn list_auctions(State(state): State<AppState>) -> Result<Json<Vec<Auction>>, ApiError> {
    let auctions = state.auctions.list().await?;
    Ok(Json(auctions))
}

/// Single auction (public)
pub async fn get_auction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Auction>, ApiError> {
    let auction = state
        .auctions
        .get(id)
        .await?
        .ok_or(ApiError::NotFound("Auction"))?;
    Ok(Json(auction))
}

/// Create an auction (admin only)
pub async fn create_auction(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<AuctionPayload>, ApiError>,
) -> Result<(StatusCode, Json<Auction>), ApiError> {
    policy::require(user.role, Action::ManageAuctions)?;
    payload.validate()?;

    let auction = state.auctions.create(payload).await?;
    Ok((StatusCode::CREATED, Json(auction)))
}

/// Update an auction (admin only)
pub async fn update_auction(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    WithRejection(Json(payload), _): WithRejection<Json<AuctionPayload>, ApiError>,
) -> Result<Json<Auction>, ApiError> {
    policy::require(user.role, Action::ManageAuctions)?;
    payload.validate()?;

    let auction = state.auctions.update(id, payload).await?;
    Ok(Json(auction))
}

/// Delete an auction (admin only); 404 for an unknown id
pub async fn delete_auction(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    policy::require(user.role, Action::ManageAuctions)?;

    state.auctions.delete(id).await?;
    Ok(Json(json!({ "message": "Auction deleted" })))
}
