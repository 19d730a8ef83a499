use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use storage::models::{Role, User};
use uuid::Uuid;

use crate::error::WebError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

/// Signing material for access tokens
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &[u8], ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Token lifetime in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    pub fn issue(&self, user: &User) -> Result<String, WebError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.user_id,
            role: user.role,
            exp: (now + self.ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| WebError::InternalServerError(format!("Failed to sign token: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, WebError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected token: {}", e);
                WebError::Unauthorized
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            user_id: Uuid::new_v4(),
            email: "liga@example.com".to_string(),
            password_hash: String::new(),
            role: Role::AdminLiga,
            league_id: Some(Uuid::new_v4()),
            club_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let keys = JwtKeys::new(b"test-secret", 1);
        let user = user();

        let token = keys.issue(&user).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, user.user_id);
        assert_eq!(claims.role, Role::AdminLiga);
        assert_eq!(keys.ttl_seconds(), 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtKeys::new(b"one", 1).issue(&user()).unwrap();
        let err = JwtKeys::new(b"two", 1).verify(&token).unwrap_err();
        assert!(matches!(err, WebError::Unauthorized));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Past the default 60s leeway
        let keys = JwtKeys::new(b"secret", -1);
        let token = keys.issue(&user()).unwrap();
        assert!(matches!(keys.verify(&token), Err(WebError::Unauthorized)));
    }
}
