//! User model
//!
//! Represents people who sign in on behalf of a company.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity
///
/// Every user belongs to exactly one company; that company is the tenant
/// all of the user's requests are scoped to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,

    /// Owning company
    pub company_id: i64,

    /// Display name
    pub full_name: String,

    /// Email address (unique, used for login)
    pub email: String,

    /// Password hash (never expose in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Lowercased, trimmed email used for lookups
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

impl Default for User {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            company_id: 0,
            full_name: String::new(),
            email: String::new(),
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// User info for API responses (without sensitive data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub company_id: i64,
    pub full_name: String,
    pub email: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            company_id: user.company_id,
            full_name: user.full_name,
            email: user.email,
        }
    }
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            company_id: user.company_id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
        }
    }
}
