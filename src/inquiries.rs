//! Customer inquiry service

use std::sync::Arc;

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Inquiry, InquiryStatus};

/// Inquiry service error
#[derive(Debug, thiserror::Error)]
pub enum InquiryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Inquiry not found")]
    NotFound,
}

/// New inquiry payload
#[derive(Debug, Deserialize, Validate)]
pub struct InquiryPayload {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub subject: Option<String>,
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}

/// Inquiry status update payload
#[derive(Debug, Deserialize)]
pub struct InquiryStatusUpdate {
    pub status: InquiryStatus,
    pub response: Option<String>,
}

/// Inquiry service
pub struct InquiryService {
    pool: Arc<PgPool>,
}

impl InquiryService {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Create an inquiry attached to the submitting principal
    pub async fn create(
        &self,
        payload: InquiryPayload,
        user_id: Uuid,
    ) -> Result<Inquiry, InquiryError> {
        let inquiry = sqlx::query_as::<_, Inquiry>(
            r#"
            INSERT INTO inquiries (name, email, subject, message, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(payload.name.trim())
        .bind(payload.email.trim())
        .bind(&payload.subject)
        .bind(&payload.message)
        .bind(user_id)
        .fetch_one(&*self.pool)
        .await?;

        Ok(inquiry)
    }

    /// List all inquiries, newest first
    pub async fn list(&self) -> Result<Vec<Inquiry>, InquiryError> {
        let inquiries =
            sqlx::query_as::<_, Inquiry>("SELECT * FROM inquiries ORDER BY created_at DESC")
                .fetch_all(&*self.pool)
                .await?;

        Ok(inquiries)
    }

    /// Update status and optional response text
    pub async fn update_status(
        &self,
        id: Uuid,
        update: InquiryStatusUpdate,
    ) -> Result<Inquiry, InquiryError> {
        let inquiry = sqlx::query_as::<_, Inquiry>(
            r#"
            UPDATE inquiries
            SET status = $1, response = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(update.status)
        .bind(&update.response)
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or(InquiryError::NotFound)?;

        Ok(inquiry)
    }

    /// Delete by id; a missing id is reported, not swallowed
    pub async fn delete(&self, id: Uuid) -> Result<(), InquiryError> {
        let result = sqlx::query("DELETE FROM inquiries WHERE id = $1")
            .bind(id)
            .execute(&*self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(InquiryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_requires_name_email_and_message() {
        let ok = InquiryPayload {
            name: "Ada".into(),
            email: "ada@x.com".into(),
            subject: Some("Test drive".into()),
            message: "Is the Supra still available?".into(),
        };
        assert!(ok.validate().is_ok());

        let missing_message = InquiryPayload {
            name: "Ada".into(),
            email: "ada@x.com".into(),
            subject: None,
            message: String::new(),
        };
        assert!(missing_message.validate().is_err());
    }

    #[test]
    fn status_update_accepts_the_stored_casing() {
        let update: InquiryStatusUpdate =
            serde_json::from_str(r#"{"status":"Responded","response":"On its way"}"#).unwrap();
        assert_eq!(update.status, InquiryStatus::Responded);
        assert_eq!(update.response.as_deref(), Some("On its way"));
    }
}
