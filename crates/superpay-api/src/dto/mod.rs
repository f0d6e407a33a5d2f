//! Data Transfer Objects (DTOs) for API requests and responses

pub mod auth;
pub mod business_partner;
pub mod common;
pub mod invoice;

pub use auth::*;
pub use business_partner::*;
pub use common::*;
pub use invoice::*;
