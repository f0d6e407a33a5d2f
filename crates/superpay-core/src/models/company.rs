//! Company model
//!
//! A company is the tenant root: users, business partners and invoices all
//! hang off it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Company entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier
    pub id: i64,

    /// Registered legal name
    pub corporate_name: String,

    /// Representative director
    pub representative: String,

    /// Phone number (e.g. 03-1234-5678)
    pub phone_number: String,

    /// Postal code (e.g. 100-0001)
    pub postal_code: String,

    /// Street address
    pub address: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Default for Company {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            corporate_name: String::new(),
            representative: String::new(),
            phone_number: String::new(),
            postal_code: String::new(),
            address: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
