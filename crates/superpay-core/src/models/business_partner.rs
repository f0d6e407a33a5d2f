//! Business partner model
//!
//! Counterparties a company sends invoices to. A partner is owned by exactly
//! one company and is removed together with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Business partner entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessPartner {
    /// Unique identifier
    pub id: i64,

    /// Owning company
    pub company_id: i64,

    /// Registered legal name
    pub corporate_name: String,

    /// Representative director
    pub representative: String,

    /// Phone number
    pub phone_number: String,

    /// Postal code
    pub postal_code: String,

    /// Street address
    pub address: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl BusinessPartner {
    /// Check whether this partner belongs to the given company
    #[inline]
    pub fn belongs_to(&self, company_id: i64) -> bool {
        self.company_id == company_id
    }
}

impl Default for BusinessPartner {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            company_id: 0,
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

/// Fields supplied when registering a partner
///
/// The owning company is never part of the input; repositories take it from
/// the caller's tenant scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBusinessPartner {
    pub corporate_name: String,
    pub representative: String,
    pub phone_number: String,
    pub postal_code: String,
    pub address: String,
}
