//! HTTP request handlers

pub mod auth;
pub mod business_partner;
pub mod health;
pub mod invoice;

use actix_web::web;

pub use auth::configure as configure_auth;
pub use business_partner::configure as configure_business_partners;
pub use health::health_check;
pub use invoice::configure as configure_invoices;

/// Mount every route: `/health` plus the `/api` scope
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api")
            .configure(configure_auth)
            .configure(configure_business_partners)
            .configure(configure_invoices),
    );
}

/// JSON body extractor config: malformed bodies render as `AppError::Validation`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            superpay_core::AppError::Validation(format!("invalid request body: {}", err)).into()
        })
}

/// Query string extractor config: malformed queries render as `AppError::InvalidInput`
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        superpay_core::AppError::InvalidInput(format!("invalid query: {}", err)).into()
    })
}
