//! Super Payment Core Library
//!
//! Foundational types for the invoice payment service:
//!
//! - Domain models (Company, User, BusinessPartner, Invoice)
//! - Invoice pricing and input validation rules
//! - Tenant scoping and repository traits
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod money;
pub mod query;
pub mod tenant;
pub mod traits;
pub mod validation;

pub use config::AppConfig;
pub use error::AppError;
pub use query::{InvoiceFilter, InvoiceQuery, Pagination};
pub use tenant::TenantScope;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
