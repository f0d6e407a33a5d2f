//! JWT Claims structure

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use superpay_core::error::AppError;
use superpay_core::models::User;

/// JWT Claims
///
/// `sub` carries the user ID as a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Company the user belonged to when the token was issued
    pub company_id: i64,

    /// User email
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user; expiration is filled in by `JwtService`
    pub fn for_user(user: &User) -> Self {
        Self {
            sub: user.id.to_string(),
            company_id: user.company_id,
            email: user.email.clone(),
            iat: Utc::now().timestamp(),
            exp: 0,
        }
    }

    /// Create claims for a user expiring after `expires_in_secs`
    pub fn with_expiration(user: &User, expires_in_secs: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::seconds(expires_in_secs);

        Self {
            iat: now.timestamp(),
            exp: exp.timestamp(),
            ..Self::for_user(user)
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }

    /// Acting user ID; must be a positive integer
    pub fn user_id(&self) -> Result<i64, AppError> {
        match self.sub.parse::<i64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(AppError::InvalidToken(format!(
                "invalid subject: {}",
                self.sub
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 42,
            company_id: 7,
            email: "owner@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_claims_for_user() {
        let claims = Claims::for_user(&user());
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.company_id, 7);
        assert_eq!(claims.email, "owner@example.com");
        assert_eq!(claims.user_id().unwrap(), 42);
        assert!(claims.iat > 0);
    }

    #[test]
    fn test_claims_with_expiration() {
        let claims = Claims::with_expiration(&user(), 3600);
        assert!(!claims.is_expired());

        let now = Utc::now().timestamp();
        assert!(claims.exp > now);
        assert!(claims.exp <= now + 3600);
    }

    #[test]
    fn test_expired_claims() {
        let mut claims = Claims::for_user(&user());
        claims.exp = (Utc::now() - Duration::hours(1)).timestamp();
        assert!(claims.is_expired());
    }

    #[test]
    fn test_invalid_subject() {
        let mut claims = Claims::for_user(&user());
        for sub in ["0", "-3", "abc", ""] {
            claims.sub = sub.to_string();
            assert!(matches!(claims.user_id(), Err(AppError::InvalidToken(_))));
        }
    }
}
