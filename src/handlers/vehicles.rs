//! Vehicle handlers.
//!
//! Creation takes a multipart body: text fields describe the vehicle,
//! file parts are forwarded to the image host and the resulting URLs
//! stored on the listing.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Vehicle;
use crate::policy::{self, Action};
use crate::uploads::UploadFile;
use crate::vehicles::VehiclePayload;

/// All vehicles, newest first (public)
pub async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, ApiError> {
    let vehicles = state.vehicles.list().await?;
    Ok(Json(vehicles))
}

/// Single vehicle (public)
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, ApiError> {
    let vehicle = state
        .vehicles
        .get(id)
        .await?
        .ok_or(ApiError::NotFound("Vehicle"))?;
    Ok(Json(vehicle))
}

/// Create a listing from multipart fields plus image files (admin only)
pub async fn create_vehicle(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Vehicle>), ApiError> {
    policy::require(user.role, Action::ManageVehicles)?;

    let mut form = VehiclePayload::default();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if field.file_name().is_some() {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await?.to_vec();
            files.push(UploadFile {
                filename,
                content_type,
                bytes,
            });
        } else {
            let value = field.text().await?;
            apply_field(&mut form, &name, value)?;
        }
    }

    form.validate()?;

    let image_urls = state.uploads.upload_batch(files).await?;
    let vehicle = state.vehicles.create(form, image_urls).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// Update a listing (admin only)
pub async fn update_vehicle(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    WithRejection(Json(payload), _): WithRejection<Json<VehiclePayload>, ApiError>,
) -> Result<Json<Vehicle>, ApiError> {
    policy::require(user.role, Action::ManageVehicles)?;
    payload.validate()?;

    let vehicle = state.vehicles.update(id, payload).await?;
    Ok(Json(vehicle))
}

/// Delete a listing (admin only); 404 for an unknown id
pub async fn delete_vehicle(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    policy::require(user.role, Action::ManageVehicles)?;

    state.vehicles.delete(id).await?;
    Ok(Json(json!({ "message": "Vehicle deleted" })))
}

/// Map one multipart text field onto the payload. Unknown fields are
/// ignored, matching the store's schema-flexible heritage.
fn apply_field(form: &mut VehiclePayload, name: &str, value: String) -> Result<(), ApiError> {
    match name {
        "make" => form.make = value,
        "model" => form.model = value,
        "year" => {
            form.year = value
                .parse()
                .map_err(|_| ApiError::Validation("year must be a number".to_string()))?
        }
        "price" => {
            form.price = value
                .parse()
                .map_err(|_| ApiError::Validation("price must be a number".to_string()))?
        }
        "mileage" => form.mileage = value,
        "exteriorColor" => form.exterior_color = Some(value),
        "interiorColor" => form.interior_color = Some(value),
        "engine" => form.engine = Some(value),
        "transmission" => form.transmission = Some(value),
        "fuelType" => form.fuel_type = Some(value),
        "description" => form.description = Some(value),
        "features" => form.features.push(value),
        "status" => {
            form.status = serde_json::from_value(serde_json::Value::String(value))
                .map_err(|_| ApiError::Validation("status is not a known value".to_string()))?
        }
        "isFeatured" => {
            form.is_featured = value
                .parse()
                .map_err(|_| ApiError::Validation("isFeatured must be a boolean".to_string()))?
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleStatus;

    #[test]
    fn fields_fold_into_a_payload() {
        let mut form = VehiclePayload::default();
        for (name, value) in [
            ("make", "Nissan"),
            ("model", "Skyline GT-R"),
            ("year", "1999"),
            ("price", "85000"),
            ("mileage", "45,000 km"),
            ("exteriorColor", "Bayside Blue"),
            ("features", "HICAS"),
            ("features", "Twin turbo"),
            ("status", "pending_inspection"),
            ("isFeatured", "true"),
            ("somethingUnknown", "ignored"),
        ] {
            apply_field(&mut form, name, value.to_string()).unwrap();
        }

        assert!(form.validate().is_ok());
        assert_eq!(form.year, 1999);
        assert_eq!(form.features, vec!["HICAS", "Twin turbo"]);
        assert_eq!(form.status, VehicleStatus::PendingInspection);
        assert!(form.is_featured);
    }

    #[test]
    fn non_numeric_year_is_a_validation_error() {
        let mut form = VehiclePayload::default();
        let err = apply_field(&mut form, "year", "soon".to_string()).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let mut form = VehiclePayload::default();
        let err = apply_field(&mut form, "status", "melted".to_string()).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
