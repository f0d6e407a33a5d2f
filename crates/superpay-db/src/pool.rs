//! PostgreSQL connection pool management
//!
//! Builds the pool from [`DatabaseConfig`] and applies the embedded schema
//! migrations.

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use superpay_core::config::DatabaseConfig;
use superpay_core::{AppError, AppResult};
use tracing::{info, warn};

/// Schema migrations compiled into the binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a PostgreSQL connection pool
///
/// The pool is verified with a round trip before it is returned, so a bad
/// URL fails at startup instead of on the first request.
///
/// # Example
///
/// ```no_run
/// use superpay_core::config::DatabaseConfig;
/// use superpay_db::create_pool;
///
/// # async fn run(config: DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(&config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn create_pool(config: &DatabaseConfig) -> AppResult<PgPool> {
    info!("Creating database connection pool");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Some(Duration::from_secs(config.idle_timeout_secs)))
        .test_before_acquire(true)
        .connect(&config.url)
        .await
        .map_err(|e| {
            warn!("Failed to create database pool: {}", e);
            AppError::Pool(format!("Failed to connect to database: {}", e))
        })?;

    info!(
        "Database pool created successfully with {} max connections",
        config.max_connections
    );

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|e| AppError::Database(format!("Database health check failed: {}", e)))?;

    info!("Database connection verified");

    Ok(pool)
}

/// Apply pending schema migrations
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!("Running database migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        warn!("Database migration failed: {}", e);
        AppError::Database(format!("Failed to run migrations: {}", e))
    })?;

    info!("Database schema is up to date");
    Ok(())
}
