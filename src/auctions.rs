//! Auction record service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Auction, AuctionStatus};

/// Auction service error
#[derive(Debug, thiserror::Error)]
pub enum AuctionError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Auction not found")]
    NotFound,
    #[error("Referenced vehicle does not exist")]
    UnknownVehicle,
    #[error("Auction window is invalid")]
    InvalidWindow,
}

/// Auction create/update payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuctionPayload {
    pub vehicle_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[validate(range(min = 0.0, message = "startingBid must not be negative"))]
    pub starting_bid: f64,
    #[serde(default)]
    pub status: AuctionStatus,
}

/// Auction service
pub struct AuctionService {
    pool: Arc<PgPool>,
}

impl AuctionService {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// The vehicle reference is soft, but create and update both refuse
    /// to store a dangling one: an unknown vehicle id is a validation
    /// failure.
    async fn ensure_vehicle_exists(&self, vehicle_id: Uuid) -> Result<(), AuctionError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles WHERE id = $1")
            .bind(vehicle_id)
            .fetch_one(&*self.pool)
            .await?;
        if count == 0 {
            return Err(AuctionError::UnknownVehicle);
        }
        Ok(())
    }

    pub async fn create(&self, payload: AuctionPayload) -> Result<Auction, AuctionError> {
        if payload.end_time <= payload.start_time {
            return Err(AuctionError::InvalidWindow);
        }
        self.ensure_vehicle_exists(payload.vehicle_id).await?;

        let auction = sqlx::query_as::<_, Auction>(
            r#"
            INSERT INTO auctions (vehicle_id, start_time, end_time, starting_bid, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(payload.vehicle_id)
        .bind(payload.start_time)
        .bind(payload.end_time)
        .bind(payload.starting_bid)
        .bind(payload.status)
        .fetch_one(&*self.pool)
        .await?;

        Ok(auction)
    }

    /// List all auctions, newest first
    pub async fn list(&self) -> Result<Vec<Auction>, AuctionError> {
        let auctions =
            sqlx::query_as::<_, Auction>("SELECT * FROM auctions ORDER BY created_at DESC")
                .fetch_all(&*self.pool)
                .await?;

        Ok(auctions)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Auction>, AuctionError> {
        let auction = sqlx::query_as::<_, Auction>("SELECT * FROM auctions WHERE id = $1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;

        Ok(auction)
    }

    pub async fn update(&self, id: Uuid, payload: AuctionPayload) -> Result<Auction, AuctionError> {
        if payload.end_time <= payload.start_time {
            return Err(AuctionError::InvalidWindow);
        }
        self.ensure_vehicle_exists(payload.vehicle_id).await?;

        let auction = sqlx::query_as::<_, Auction>(
            r#"
            UPDATE auctions
            SET vehicle_id = $1, start_time = $2, end_time = $3,
                starting_bid = $4, status = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(payload.vehicle_id)
        .bind(payload.start_time)
        .bind(payload.end_time)
        .bind(payload.starting_bid)
        .bind(payload.status)
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or(AuctionError::NotFound)?;

        Ok(auction)
    }

    /// Delete by id; a missing id is reported, not swallowed
    pub async fn delete(&self, id: Uuid) -> Result<(), AuctionError> {
        let result = sqlx::query("DELETE FROM auctions WHERE id = $1")
            .bind(id)
            .execute(&*self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AuctionError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_the_camel_case_wire_format() {
        let payload: AuctionPayload = serde_json::from_str(
            r#"{
                "vehicleId": "7f2f9d5e-6f59-4a54-9d5e-0b3c8a3b1de2",
                "startTime": "2026-09-01T12:00:00Z",
                "endTime": "2026-09-08T12:00:00Z",
                "startingBid": 15000.0
            }"#,
        )
        .unwrap();
        assert_eq!(payload.status, AuctionStatus::Pending);
        assert_eq!(payload.starting_bid, 15000.0);
        assert!(payload.end_time > payload.start_time);
    }

    #[test]
    fn negative_starting_bid_fails_validation() {
        let payload: AuctionPayload = serde_json::from_str(
            r#"{
                "vehicleId": "7f2f9d5e-6f59-4a54-9d5e-0b3c8a3b1de2",
                "startTime": "2026-09-01T12:00:00Z",
                "endTime": "2026-09-08T12:00:00Z",
                "startingBid": -5.0
            }"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());
    }
}
