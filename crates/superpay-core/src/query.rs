//! Invoice listing parameters
//!
//! Filter predicates, ordering and pagination shared by every invoice store.
//! The SQL builder in `superpay-db` and the in-process store both follow the
//! rules defined here.

use crate::models::Invoice;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;

/// Page used when none (or a non-positive one) is requested
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when none (or a non-positive one) is requested
pub const DEFAULT_LIMIT: i64 = 20;

/// Largest page size a caller may request
pub const MAX_LIMIT: i64 = 100;

/// Optional invoice predicates, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFilter {
    /// Inclusive lower bound on the payment due date
    pub start_date: Option<DateTime<Utc>>,

    /// Inclusive upper bound on the payment due date
    pub end_date: Option<DateTime<Utc>>,

    /// Exact status match; unknown values match nothing
    pub status: Option<String>,
}

impl InvoiceFilter {
    /// Evaluate the filter against an invoice
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if let Some(start) = self.start_date {
            if invoice.payment_due_date < start {
                return false;
            }
        }

        if let Some(end) = self.end_date {
            if invoice.payment_due_date > end {
                return false;
            }
        }

        match &self.status {
            Some(status) => invoice.status.as_str() == status,
            None => true,
        }
    }
}

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Raw parameters, not yet normalized
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Apply listing defaults: page < 1 becomes 1, limit < 1 becomes 20,
    /// limit above 100 is clamped to 100
    pub fn normalized(self) -> Self {
        let page = if self.page < 1 { DEFAULT_PAGE } else { self.page };
        let limit = if self.limit < 1 {
            DEFAULT_LIMIT
        } else {
            self.limit.min(MAX_LIMIT)
        };

        Self { page, limit }
    }

    /// LIMIT clause value; `None` means unbounded
    pub fn limit(&self) -> Option<i64> {
        (self.limit > 0).then_some(self.limit)
    }

    /// OFFSET clause value; only emitted past the first page of a bounded listing
    ///
    /// Saturates at `i64::MAX`, so a page beyond any stored row is simply empty.
    pub fn offset(&self) -> Option<i64> {
        match self.limit() {
            Some(limit) if self.page > 1 => Some((self.page - 1).saturating_mul(limit)),
            _ => None,
        }
    }
}

/// A complete listing request: predicates plus page window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceQuery {
    pub filter: InvoiceFilter,
    pub pagination: Pagination,
}

impl InvoiceQuery {
    pub fn new(filter: InvoiceFilter, pagination: Pagination) -> Self {
        Self { filter, pagination }
    }
}

/// Listing order: furthest payment due date first, then insertion order
pub fn listing_order(a: &Invoice, b: &Invoice) -> Ordering {
    b.payment_due_date
        .cmp(&a.payment_due_date)
        .then_with(|| a.id.cmp(&b.id))
}
