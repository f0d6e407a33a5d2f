//! Company repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use superpay_core::{models::Company, traits::CompanyRepository, AppError, AppResult};
use tracing::{debug, error, instrument};

/// PostgreSQL implementation of CompanyRepository
pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Company>> {
        debug!("Finding company by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, CompanyRow>(
            r#"
            SELECT id, corporate_name, representative, phone_number,
                   postal_code, address, created_at, updated_at
            FROM companies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding company {}: {}", id, e);
            AppError::Database(format!("Failed to find company: {}", e))
        })?;

        Ok(result.map(Into::into))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CompanyRow {
    id: i64,
    corporate_name: String,
    representative: String,
    phone_number: String,
    postal_code: String,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Company {
            id: row.id,
            corporate_name: row.corporate_name,
            representative: row.representative,
            phone_number: row.phone_number,
            postal_code: row.postal_code,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
