//! API error type and HTTP mapping.
//!
//! Per-service errors (`UserError`, `VehicleError`, ...) convert into
//! [`ApiError`]; anything unexpected collapses to a generic 500 with
//! the detail only logged.

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::auctions::AuctionError;
use crate::inquiries::InquiryError;
use crate::uploads::UploadError;
use crate::users::UserError;
use crate::vehicles::VehicleError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Upload service is not configured")]
    UploadUnavailable,
    #[error("Internal server error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UploadUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref source) = self {
            tracing::error!("internal error: {source:#}");
        }
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Validation(err.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateEmail => ApiError::Validation("Email already in use".to_string()),
            UserError::InvalidCredentials => ApiError::Unauthorized("Invalid email or password"),
            UserError::NotFound => ApiError::NotFound("User"),
            UserError::Database(e) => ApiError::Internal(e.into()),
            UserError::Hash(e) => ApiError::Internal(e.into()),
        }
    }
}

impl From<VehicleError> for ApiError {
    fn from(err: VehicleError) -> Self {
        match err {
            VehicleError::NotFound => ApiError::NotFound("Vehicle"),
            VehicleError::Database(e) => ApiError::Internal(e.into()),
        }
    }
}

impl From<AuctionError> for ApiError {
    fn from(err: AuctionError) -> Self {
        match err {
            AuctionError::NotFound => ApiError::NotFound("Auction"),
            AuctionError::UnknownVehicle => {
                ApiError::Validation("Referenced vehicle does not exist".to_string())
            }
            AuctionError::InvalidWindow => {
                ApiError::Validation("endTime must be after startTime".to_string())
            }
            AuctionError::Database(e) => ApiError::Internal(e.into()),
        }
    }
}

impl From<InquiryError> for ApiError {
    fn from(err: InquiryError) -> Self {
        match err {
            InquiryError::NotFound => ApiError::NotFound("Inquiry"),
            InquiryError::Database(e) => ApiError::Internal(e.into()),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::NotConfigured => ApiError::UploadUnavailable,
            UploadError::Request(e) => ApiError::Internal(e.into()),
            UploadError::MissingUrl => {
                ApiError::Internal(anyhow::anyhow!("image host response missing secure_url"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Forbidden("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound("Vehicle").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::UploadUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_email_maps_to_400() {
        let err: ApiError = UserError::DuplicateEmail.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Email already in use");
    }

    #[test]
    fn bad_credentials_map_to_a_single_401_message() {
        let err: ApiError = UserError::InvalidCredentials.into();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn internal_errors_expose_a_generic_message() {
        let err: ApiError = UserError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn unknown_vehicle_reference_maps_to_400() {
        let err: ApiError = AuctionError::UnknownVehicle.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
