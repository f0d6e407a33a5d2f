//! JWT token creation and validation service

use crate::claims::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use superpay_core::error::AppError;
use superpay_core::models::User;
use tracing::{debug, error, warn};

/// JWT Service for token creation and validation (HS256)
#[derive(Clone)]
pub struct JwtService {
    /// Default token expiration time in seconds
    expiration_secs: i64,

    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Create a new JWT service
    ///
    /// ```
    /// use superpay_auth::JwtService;
    ///
    /// let jwt_service = JwtService::new("my-secret-key", 3600);
    /// assert_eq!(jwt_service.expiration_secs(), 3600);
    /// ```
    pub fn new(secret: &str, expiration_secs: i64) -> Self {
        Self {
            expiration_secs,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Create a JWT token from claims
    ///
    /// Claims without an expiration get the service default.
    pub fn create_token(&self, claims: &Claims) -> Result<String, AppError> {
        let mut token_claims = claims.clone();

        if token_claims.exp == 0 {
            let exp = Utc::now() + Duration::seconds(self.expiration_secs);
            token_claims.exp = exp.timestamp();
        }

        debug!(
            sub = %token_claims.sub,
            company_id = token_claims.company_id,
            exp = %token_claims.exp,
            "Creating JWT token"
        );

        encode(&Header::default(), &token_claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "Failed to create JWT token");
            AppError::InvalidToken(format!("Token creation failed: {}", e))
        })
    }

    /// Issue a token for a user
    pub fn create_token_for_user(&self, user: &User) -> Result<String, AppError> {
        self.create_token(&Claims::for_user(user))
    }

    /// Validate a JWT token and extract claims
    ///
    /// # Errors
    ///
    /// - `AppError::TokenExpired` if the token has expired
    /// - `AppError::InvalidToken` if the signature or payload is invalid
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                if matches!(e.kind(), ErrorKind::ExpiredSignature) {
                    warn!("Token expired");
                    return AppError::TokenExpired;
                }

                warn!(error = %e, "Invalid token");
                AppError::InvalidToken(format!("Token validation failed: {}", e))
            })?;

        let claims = token_data.claims;

        // jsonwebtoken allows 60s of leeway on exp
        if claims.is_expired() {
            warn!(sub = %claims.sub, "Token expired (manual check)");
            return Err(AppError::TokenExpired);
        }

        debug!(sub = %claims.sub, "Token validated successfully");

        Ok(claims)
    }

    /// Get the expiration time for tokens created by this service
    pub fn expiration_secs(&self) -> i64 {
        self.expiration_secs
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_secs", &self.expiration_secs)
            .finish_non_exhaustive()
    }
}
