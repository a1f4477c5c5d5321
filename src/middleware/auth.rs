//! Authentication extractor.
//!
//! Per-request state machine: no bearer token → 401; token fails
//! verification → 403; principal missing or inactive → 401; otherwise
//! the loaded `User` rides along into the handler.

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::RequestPartsExt;
use axum_extra::TypedHeader;
use headers::authorization::Bearer;
use headers::Authorization;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::models::{User, UserStatus};

/// The authenticated principal attached to a request
pub struct AuthenticatedUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| ApiError::Unauthorized("No token provided"))?;

        let claims = state
            .tokens
            .verify(bearer.token())
            .ok_or(ApiError::Forbidden("Invalid or expired token"))?;

        let user = state.users.find_by_id(claims.sub).await?;
        match user {
            Some(user) if user.status == UserStatus::Active => Ok(AuthenticatedUser(user)),
            _ => Err(ApiError::Unauthorized("User not found or inactive")),
        }
    }
}
