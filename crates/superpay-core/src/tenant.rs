//! Tenant scoping
//!
//! A [`TenantScope`] names the company a request acts for. It can only be
//! built from a [`User`] loaded from storage, and every tenant-scoped
//! repository call takes one, so a query cannot be issued without a
//! company predicate.

use crate::models::User;

/// Verified company identity of the acting user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TenantScope {
    company_id: i64,
    user_id: i64,
}

impl TenantScope {
    /// Scope requests to the company of a resolved user
    pub fn for_user(user: &User) -> Self {
        Self {
            company_id: user.company_id,
            user_id: user.id,
        }
    }

    /// Company every scoped read and write is restricted to
    #[inline]
    pub fn company_id(&self) -> i64 {
        self.company_id
    }

    /// User acting within the scope
    #[inline]
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Check whether a record owned by `company_id` is visible in this scope
    #[inline]
    pub fn owns(&self, company_id: i64) -> bool {
        self.company_id == company_id
    }
}
