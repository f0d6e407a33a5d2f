//! SuperPay Database Layer
//!
//! Storage implementations of the repository traits defined in
//! `superpay-core`:
//!
//! - Connection pool management and embedded migrations with sqlx
//! - PostgreSQL repositories for companies, users, partners and invoices
//! - Tenant-scoped, fully parameterized invoice listing queries
//! - An in-process [`MemoryStore`] with the same semantics

pub mod memory;
pub mod pool;
pub mod repositories;

pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations};
pub use repositories::*;

// Re-export commonly used types
pub use sqlx::PgPool;
pub use superpay_core::{AppError, AppResult};
