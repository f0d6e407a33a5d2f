//! Repository implementations
//!
//! Concrete PostgreSQL implementations of the repository traits defined in
//! superpay-core, using sqlx runtime queries.

pub mod business_partner_repo;
pub mod company_repo;
pub mod invoice_repo;
pub mod user_repo;

pub use business_partner_repo::PgBusinessPartnerRepository;
pub use company_repo::PgCompanyRepository;
pub use invoice_repo::{build_list_query, PgInvoiceRepository};
pub use user_repo::PgUserRepository;
