//! Business logic services for SuperPay
//!
//! Services own trait-object repositories (see [`Repositories`]) and are
//! shared across Actix workers behind `web::Data`. Every operation takes
//! the acting user's ID and resolves the tenant scope from storage before
//! touching company data.
//!
//! # Services
//!
//! - `InvoiceService` - Invoice creation, pricing, retrieval and listing
//! - `BusinessPartnerService` - Partner registration and listing
//! - `AuthService` - Login and current-user lookup

pub mod auth;
pub mod business_partner;
pub mod clock;
pub mod invoice;
pub mod repositories;
pub mod tenant;

pub use auth::{AuthService, LoginOutcome};
pub use business_partner::BusinessPartnerService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use invoice::{CreateInvoiceInput, InvoiceService};
pub use repositories::Repositories;

/// Business logic constants
pub mod constants {
    use superpay_core::money::InvoiceRates;

    /// Rates applied to every new invoice: 4% fee, 10% tax on the fee
    pub const INVOICE_RATES: InvoiceRates = InvoiceRates::standard();
}
