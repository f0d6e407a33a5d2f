//! Authentication for SuperPay
//!
//! JWT-based authentication, Argon2 password hashing and an Actix-web
//! extractor yielding the acting user.
//!
//! # Examples
//!
//! ```no_run
//! use actix_web::HttpResponse;
//! use superpay_auth::AuthenticatedUser;
//!
//! async fn protected_route(user: AuthenticatedUser) -> HttpResponse {
//!     HttpResponse::Ok().json(serde_json::json!({ "user_id": user.user_id }))
//! }
//! ```

pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::AuthenticatedUser;
pub use password::PasswordService;
