//! Credential service: signed, time-limited tokens.
//!
//! Tokens are HS256 JWTs carrying the principal id; they expire seven
//! days after issue. `verify` never panics and never returns a partial
//! result: any failure (signature, expiry, malformed claims) yields
//! `None` and the caller decides how to respond.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const TOKEN_LIFETIME_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token for `user_id`, expiring in seven days
    pub fn issue(&self, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify signature and expiry; `None` on any failure
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_to_the_same_principal() {
        let service = TokenService::new("test-secret");
        let user_id = Uuid::new_v4();
        let token = service.issue(user_id).unwrap();

        let claims = service.verify(&token).expect("token should verify");
        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn expired_token_is_invalid() {
        let service = TokenService::new("test-secret");
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: (now - Duration::days(8)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &service.encoding).unwrap();

        assert!(service.verify(&token).is_none());
    }

    #[test]
    fn token_signed_with_a_different_secret_is_invalid() {
        let issuer = TokenService::new("secret-a");
        let verifier = TokenService::new("secret-b");
        let token = issuer.issue(Uuid::new_v4()).unwrap();

        assert!(verifier.verify(&token).is_none());
    }

    #[test]
    fn garbage_is_invalid() {
        let service = TokenService::new("test-secret");
        assert!(service.verify("not-a-token").is_none());
        assert!(service.verify("a.b.c").is_none());
        assert!(service.verify("").is_none());
    }
}
