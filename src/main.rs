//! SuperPay backend server
//!
//! Serves invoice, business partner and authentication endpoints for
//! multiple companies sharing one PostgreSQL database.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpServer};
use std::env;
use std::io;
use std::sync::Arc;
use superpay_api::{configure_routes, json_config, query_config};
use superpay_auth::{JwtService, PasswordService};
use superpay_core::AppConfig;
use superpay_db::{create_pool, run_migrations};
use superpay_services::{AuthService, BusinessPartnerService, InvoiceService, Repositories};
use tracing::{error, info};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives: Vec<String> = [
            "super_payment",
            "superpay_api",
            "superpay_services",
            "superpay_db",
            "superpay_auth",
        ]
        .iter()
        .map(|target| format!("{}={}", target, log_level))
        .chain(["actix_web=info".to_string(), "sqlx=warn".to_string()])
        .collect();
        EnvFilter::new(directives.join(","))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    info!("Starting SuperPay backend v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().map_err(|e| startup_error("Invalid configuration", e))?;

    info!("Connecting to database...");
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| startup_error("Failed to create database pool", e))?;
    info!(
        "Database connection established with {} max connections",
        config.database.max_connections
    );

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| startup_error("Failed to apply migrations", e))?;
        info!("Database migrations applied");
    }

    let jwt_service = Arc::new(JwtService::new(
        &config.auth.jwt_secret,
        config.auth.jwt_expiration_secs(),
    ));
    let password_service = Arc::new(PasswordService::new());
    info!(
        "JWT service configured with {} second token expiration",
        jwt_service.expiration_secs()
    );

    let repos = Repositories::postgres(pool);
    let invoice_service = web::Data::new(InvoiceService::new(repos.clone()));
    let partner_service = web::Data::new(BusinessPartnerService::new(repos.clone()));
    let auth_service = web::Data::new(AuthService::new(
        repos,
        jwt_service.clone(),
        password_service,
    ));
    let jwt_data = web::Data::new(jwt_service);

    let cors_origins = config.cors.origins();
    let bind_addr = config.server_addr();
    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, config.server.workers
    );

    HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
                header::COOKIE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(jwt_data.clone())
            .app_data(auth_service.clone())
            .app_data(partner_service.clone())
            .app_data(invoice_service.clone())
            .app_data(json_config())
            .app_data(query_config())
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Compress::default())
            .configure(configure_routes)
    })
    .workers(config.server.workers)
    .keep_alive(std::time::Duration::from_secs(config.server.timeout_secs))
    .bind(&bind_addr)?
    .run()
    .await
}
