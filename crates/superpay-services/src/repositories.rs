//! Repository wiring
//!
//! Services depend on the repository traits only; this bundle picks the
//! backing store once at startup.

use std::sync::Arc;
use superpay_core::traits::{
    BusinessPartnerRepository, CompanyRepository, InvoiceRepository, UserRepository,
};
use superpay_db::{
    MemoryStore, PgBusinessPartnerRepository, PgCompanyRepository, PgInvoiceRepository,
    PgPool, PgUserRepository,
};

/// Trait objects for every repository a service may need
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub companies: Arc<dyn CompanyRepository>,
    pub partners: Arc<dyn BusinessPartnerRepository>,
    pub invoices: Arc<dyn InvoiceRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            companies: Arc::new(PgCompanyRepository::new(pool.clone())),
            partners: Arc::new(PgBusinessPartnerRepository::new(pool.clone())),
            invoices: Arc::new(PgInvoiceRepository::new(pool)),
        }
    }

    /// All repositories served by one in-process store
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            companies: store.clone(),
            partners: store.clone(),
            invoices: store,
        }
    }
}
