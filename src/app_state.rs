//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auctions::AuctionService;
use crate::inquiries::InquiryService;
use crate::token::TokenService;
use crate::uploads::UploadService;
use crate::users::UserService;
use crate::vehicles::VehicleService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub vehicles: Arc<VehicleService>,
    pub auctions: Arc<AuctionService>,
    pub inquiries: Arc<InquiryService>,
    pub tokens: Arc<TokenService>,
    pub uploads: Arc<UploadService>,
}

impl AppState {
    pub fn new(
        users: Arc<UserService>,
        vehicles: Arc<VehicleService>,
        auctions: Arc<AuctionService>,
        inquiries: Arc<InquiryService>,
        tokens: Arc<TokenService>,
        uploads: Arc<UploadService>,
    ) -> Self {
        Self {
            users,
            vehicles,
            auctions,
            inquiries,
            tokens,
            uploads,
        }
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for Arc<VehicleService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.vehicles.clone()
    }
}

impl FromRef<AppState> for Arc<AuctionService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auctions.clone()
    }
}

impl FromRef<AppState> for Arc<InquiryService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.inquiries.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<UploadService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.uploads.clone()
    }
}
