//! User service: registration, login, lookups, role management

use std::sync::Arc;

use bcrypt::{hash, verify};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Role, User};

const BCRYPT_COST: u32 = 12;

/// User service error
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Email already in use")]
    DuplicateEmail,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User not found")]
    NotFound,
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Login request.
///
/// Email format is deliberately not validated here: a malformed email
/// is just a failed login, and must look like one (401, same message).
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Role update request
#[derive(Debug, Deserialize)]
pub struct RoleUpdateRequest {
    pub role: Role,
}

/// Partial self-service profile update; absent fields are left as stored
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
}

/// User service
pub struct UserService {
    pool: Arc<PgPool>,
}

impl UserService {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Register a new user.
    ///
    /// Emails are stored lowercased; a duplicate yields
    /// [`UserError::DuplicateEmail`] and never creates a second row.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, UserError> {
        let email = req.email.trim().to_lowercase();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(&email)
            .fetch_one(&*self.pool)
            .await?;
        if count > 0 {
            return Err(UserError::DuplicateEmail);
        }

        let password_hash = hash(&req.password, BCRYPT_COST)?;
        let role = req.role.unwrap_or_default();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, role, status,
                      created_at, updated_at
            "#,
        )
        .bind(req.username.trim())
        .bind(&email)
        .bind(&password_hash)
        .bind(role)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| {
            // Unique violation under a concurrent register with the same email
            if let sqlx::Error::Database(db) = &e {
                if db.code().as_deref() == Some("23505") {
                    return UserError::DuplicateEmail;
                }
            }
            UserError::Database(e)
        })?;

        Ok(user)
    }

    /// Authenticate by email and password.
    ///
    /// Unknown email and wrong password both collapse into
    /// [`UserError::InvalidCredentials`] so the response carries no
    /// account-enumeration signal.
    pub async fn authenticate(&self, req: &LoginRequest) -> Result<User, UserError> {
        let email = req.email.trim().to_lowercase();

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(&*self.pool)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if verify(&req.password, &user.password_hash)? {
            Ok(user)
        } else {
            Err(UserError::InvalidCredentials)
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;

        Ok(user)
    }

    /// List all users, newest first
    pub async fn list(&self) -> Result<Vec<User>, UserError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&*self.pool)
            .await?;

        Ok(users)
    }

    /// Update the caller's own username and/or email.
    ///
    /// A changed email goes through the same uniqueness gate as
    /// registration.
    pub async fn update_profile(
        &self,
        id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<User, UserError> {
        let email = req.email.map(|e| e.trim().to_lowercase());

        if let Some(email) = &email {
            let count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1 AND id <> $2")
                    .bind(email)
                    .bind(id)
                    .fetch_one(&*self.pool)
                    .await?;
            if count > 0 {
                return Err(UserError::DuplicateEmail);
            }
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = COALESCE($1, username),
                email = COALESCE($2, email),
                updated_at = NOW()
            WHERE id = $3
            RETURNING id, username, email, password_hash, role, status,
                      created_at, updated_at
            "#,
        )
        .bind(req.username.as_deref().map(str::trim))
        .bind(&email)
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.code().as_deref() == Some("23505") {
                    return UserError::DuplicateEmail;
                }
            }
            UserError::Database(e)
        })?
        .ok_or(UserError::NotFound)?;

        Ok(user)
    }

    /// Change a user's role
    pub async fn set_role(&self, id: Uuid, role: Role) -> Result<User, UserError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET role = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, username, email, password_hash, role, status,
                      created_at, updated_at
            "#,
        )
        .bind(role)
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or(UserError::NotFound)?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_verifies_and_rejects() {
        let hashed = hash("correct horse", BCRYPT_COST).unwrap();
        assert!(verify("correct horse", &hashed).unwrap());
        assert!(!verify("battery staple", &hashed).unwrap());
    }

    #[test]
    fn register_request_requires_a_real_email_and_password() {
        let ok = RegisterRequest {
            username: "a".into(),
            email: "a@x.com".into(),
            password: "longenough".into(),
            role: None,
        };
        assert!(ok.validate().is_ok());

        let bad_email = RegisterRequest {
            username: "a".into(),
            email: "not-an-email".into(),
            password: "longenough".into(),
            role: None,
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            username: "a".into(),
            email: "a@x.com".into(),
            password: "short".into(),
            role: None,
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn profile_update_validates_only_the_fields_present() {
        let empty = UpdateProfileRequest {
            username: None,
            email: None,
        };
        assert!(empty.validate().is_ok());

        let renamed = UpdateProfileRequest {
            username: Some("new-handle".into()),
            email: None,
        };
        assert!(renamed.validate().is_ok());

        let bad_email = UpdateProfileRequest {
            username: None,
            email: Some("not-an-email".into()),
        };
        assert!(bad_email.validate().is_err());

        let blank_username = UpdateProfileRequest {
            username: Some(String::new()),
            email: None,
        };
        assert!(blank_username.validate().is_err());
    }

    #[test]
    fn register_request_accepts_an_optional_role() {
        let payload = r#"{"username":"a","email":"a@x.com","password":"longenough"}"#;
        let req: RegisterRequest = serde_json::from_str(payload).unwrap();
        assert!(req.role.is_none());

        let payload = r#"{"username":"a","email":"a@x.com","password":"longenough","role":"admin"}"#;
        let req: RegisterRequest = serde_json::from_str(payload).unwrap();
        assert_eq!(req.role, Some(Role::Admin));
    }
}
