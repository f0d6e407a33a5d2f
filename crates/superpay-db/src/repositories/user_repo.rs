//! User repository implementation
//!
//! Lookups used by login and by tenant resolution on every request.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use superpay_core::{models::User, traits::UserRepository, AppError, AppResult};
use tracing::{debug, error, instrument};

/// PostgreSQL implementation of UserRepository
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: PgRow) -> User {
        User {
            id: row.get("id"),
            company_id: row.get("company_id"),
            full_name: row.get("full_name"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let result = sqlx::query(
            r#"
            SELECT id, company_id, full_name, email, password_hash,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .map(Self::map_row)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding user {}: {}", id, e);
            AppError::Database(format!("Failed to find user: {}", e))
        })?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        debug!("Finding user by email");

        let result = sqlx::query(
            r#"
            SELECT id, company_id, full_name, email, password_hash,
                   created_at, updated_at
            FROM users
            WHERE LOWER(email) = $1
            "#,
        )
        .bind(User::normalize_email(email))
        .map(Self::map_row)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding user by email: {}", e);
            AppError::Database(format!("Failed to find user: {}", e))
        })?;

        Ok(result)
    }
}
