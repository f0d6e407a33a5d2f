//! Domain models for SuperPay
//!
//! This module contains all the core domain models used throughout the application.

pub mod business_partner;
pub mod company;
pub mod invoice;
pub mod user;

pub use business_partner::{BusinessPartner, NewBusinessPartner};
pub use company::Company;
pub use invoice::{Invoice, InvoiceDetail, InvoiceStatus, NewInvoice};
pub use user::{User, UserInfo};
