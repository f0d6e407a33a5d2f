//! Authentication DTOs

use super::business_partner::CompanyResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use superpay_core::models::UserInfo;
use validator::Validate;

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Access token (JWT)
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    pub user: UserInfo,
    pub company: CompanyResponse,
}

impl LoginResponse {
    pub fn new(
        access_token: String,
        expires_in: i64,
        user: UserInfo,
        company: CompanyResponse,
    ) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
            company,
        }
    }
}

/// Current user response
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub user: UserInfo,
    pub company: CompanyResponse,
    pub token_expires_at: DateTime<Utc>,
}
