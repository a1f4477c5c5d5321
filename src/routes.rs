//! Route definitions for the motorbid API

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::app_state::AppState;
use crate::handlers::*;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/me", get(me).put(update_me))
        .route("/api/users", get(list_users))
        .route("/api/users/:id/role", put(set_user_role))
}

pub fn vehicle_routes() -> Router<AppState> {
    Router::new()
        .route("/api/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/api/vehicles/:id",
            get(get_vehicle)
                .put(update_vehicle)
                .delete(delete_vehicle),
        )
}

pub fn auction_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auctions", get(list_auctions).post(create_auction))
        .route(
            "/api/auctions/:id",
            get(get_auction)
                .put(update_auction)
                .delete(delete_auction),
        )
}

pub fn inquiry_routes() -> Router<AppState> {
    Router::new()
        .route("/api/inquiries", post(create_inquiry).get(list_inquiries))
        .route("/api/inquiries/:id/status", put(update_inquiry_status))
        .route("/api/inquiries/:id", delete(delete_inquiry))
}

/// Assemble the full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(auth_routes())
        .merge(user_routes())
        .merge(vehicle_routes())
        .merge(auction_routes())
        .merge(inquiry_routes())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
