//! Repository traits
//!
//! Storage seams for the service layer. Reads and writes that belong to a
//! tenant take a [`TenantScope`], so the owning company always comes from the
//! authenticated user and never from request input.

use crate::error::AppError;
use crate::models::{
    BusinessPartner, Company, Invoice, InvoiceDetail, NewBusinessPartner, NewInvoice, User,
};
use crate::query::InvoiceQuery;
use crate::tenant::TenantScope;
use async_trait::async_trait;

/// User lookups
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

/// Company lookups
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, AppError>;
}

/// Business partner persistence
#[async_trait]
pub trait BusinessPartnerRepository: Send + Sync {
    /// Find partner by ID regardless of owner
    ///
    /// Callers must check ownership against their scope before exposing it.
    async fn find_by_id(&self, id: i64) -> Result<Option<BusinessPartner>, AppError>;

    /// List partners of the scoped company, oldest first
    async fn list_by_company(&self, scope: &TenantScope)
        -> Result<Vec<BusinessPartner>, AppError>;

    /// Register a partner under the scoped company
    async fn create(
        &self,
        scope: &TenantScope,
        partner: &NewBusinessPartner,
    ) -> Result<BusinessPartner, AppError>;
}

/// Invoice persistence
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Persist a priced invoice under the scoped company
    async fn create(&self, scope: &TenantScope, invoice: &NewInvoice) -> Result<Invoice, AppError>;

    /// Find an invoice with its company and partner, regardless of owner
    async fn find_by_id(&self, id: i64) -> Result<Option<InvoiceDetail>, AppError>;

    /// List the scoped company's invoices matching `query`
    ///
    /// Results are ordered by payment due date descending, ties by ID.
    async fn list(
        &self,
        scope: &TenantScope,
        query: &InvoiceQuery,
    ) -> Result<Vec<InvoiceDetail>, AppError>;
}
