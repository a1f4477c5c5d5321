//! Vehicle listing service

use std::sync::Arc;

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Vehicle, VehicleStatus};

/// Vehicle service error
#[derive(Debug, thiserror::Error)]
pub enum VehicleError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Vehicle not found")]
    NotFound,
}

/// Vehicle create/update payload.
///
/// Image URLs are not part of the payload; they come from the upload
/// adapter on create and are left untouched on update.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePayload {
    #[validate(length(min = 1, message = "make is required"))]
    pub make: String,
    #[validate(length(min = 1, message = "model is required"))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100, message = "year is out of range"))]
    pub year: i32,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[validate(length(min = 1, message = "mileage is required"))]
    pub mileage: String,
    pub exterior_color: Option<String>,
    pub interior_color: Option<String>,
    pub engine: Option<String>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(default)]
    pub is_featured: bool,
}

/// Vehicle service
pub struct VehicleService {
    pool: Arc<PgPool>,
}

impl VehicleService {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        payload: VehiclePayload,
        image_urls: Vec<String>,
    ) -> Result<Vehicle, VehicleError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                make, model, year, price, mileage, exterior_color,
                interior_color, engine, transmission, fuel_type,
                description, image_urls, features, status, is_featured
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(&payload.make)
        .bind(&payload.model)
        .bind(payload.year)
        .bind(payload.price)
        .bind(&payload.mileage)
        .bind(&payload.exterior_color)
        .bind(&payload.interior_color)
        .bind(&payload.engine)
        .bind(&payload.transmission)
        .bind(&payload.fuel_type)
        .bind(&payload.description)
        .bind(&image_urls)
        .bind(&payload.features)
        .bind(payload.status)
        .bind(payload.is_featured)
        .fetch_one(&*self.pool)
        .await?;

        Ok(vehicle)
    }

    /// List all vehicles, newest first
    pub async fn list(&self) -> Result<Vec<Vehicle>, VehicleError> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
                .fetch_all(&*self.pool)
                .await?;

        Ok(vehicles)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Vehicle>, VehicleError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Full-field update; image URLs are left as stored
    pub async fn update(&self, id: Uuid, payload: VehiclePayload) -> Result<Vehicle, VehicleError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET make = $1, model = $2, year = $3, price = $4, mileage = $5,
                exterior_color = $6, interior_color = $7, engine = $8,
                transmission = $9, fuel_type = $10, description = $11,
                features = $12, status = $13, is_featured = $14,
                updated_at = NOW()
            WHERE id = $15
            RETURNING *
            "#,
        )
        .bind(&payload.make)
        .bind(&payload.model)
        .bind(payload.year)
        .bind(payload.price)
        .bind(&payload.mileage)
        .bind(&payload.exterior_color)
        .bind(&payload.interior_color)
        .bind(&payload.engine)
        .bind(&payload.transmission)
        .bind(&payload.fuel_type)
        .bind(&payload.description)
        .bind(&payload.features)
        .bind(payload.status)
        .bind(payload.is_featured)
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or(VehicleError::NotFound)?;

        Ok(vehicle)
    }

    /// Delete by id; a missing id is reported, not swallowed
    pub async fn delete(&self, id: Uuid) -> Result<(), VehicleError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&*self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(VehicleError::NotFound);
        }
        Ok(())
    }
}
