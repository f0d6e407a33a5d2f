//! API layer for SuperPay
//!
//! HTTP handlers for authentication, business partners and invoices.
//! Handlers only translate between HTTP and the services in
//! `superpay-services`; every error renders through `AppError`.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod dto;
pub mod handlers;

pub use dto::ApiResponse;
pub use handlers::{configure_routes, json_config, query_config};
