//! Business partner repository implementation
//!
//! Listing and creation are bound to the caller's tenant scope; the owning
//! company is never read from request input.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use superpay_core::{
    models::{BusinessPartner, NewBusinessPartner},
    traits::BusinessPartnerRepository,
    AppError, AppResult, TenantScope,
};
use tracing::{debug, error, info, instrument};

/// PostgreSQL implementation of BusinessPartnerRepository
pub struct PgBusinessPartnerRepository {
    pool: PgPool,
}

impl PgBusinessPartnerRepository {
    /// Create a new business partner repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PARTNER_SELECT_COLUMNS: &str = r#"
    id, company_id, corporate_name, representative,
    phone_number, postal_code, address,
    created_at, updated_at
"#;

#[async_trait]
impl BusinessPartnerRepository for PgBusinessPartnerRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> AppResult<Option<BusinessPartner>> {
        debug!("Finding business partner by id: {}", id);

        let query = format!(
            "SELECT {} FROM business_partners WHERE id = $1",
            PARTNER_SELECT_COLUMNS
        );

        let result = sqlx::query_as::<sqlx::Postgres, BusinessPartnerRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error finding business partner {}: {}", id, e);
                AppError::Database(format!("Failed to find business partner: {}", e))
            })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self), fields(company_id = scope.company_id()))]
    async fn list_by_company(&self, scope: &TenantScope) -> AppResult<Vec<BusinessPartner>> {
        debug!("Listing business partners");

        let query = format!(
            "SELECT {} FROM business_partners WHERE company_id = $1 ORDER BY id",
            PARTNER_SELECT_COLUMNS
        );

        let rows = sqlx::query_as::<sqlx::Postgres, BusinessPartnerRow>(&query)
            .bind(scope.company_id())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error listing business partners: {}", e);
                AppError::Database(format!("Failed to fetch business partners: {}", e))
            })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, partner), fields(company_id = scope.company_id()))]
    async fn create(
        &self,
        scope: &TenantScope,
        partner: &NewBusinessPartner,
    ) -> AppResult<BusinessPartner> {
        debug!("Creating business partner: {}", partner.corporate_name);

        let query = format!(
            r#"
            INSERT INTO business_partners (
                company_id, corporate_name, representative,
                phone_number, postal_code, address
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            PARTNER_SELECT_COLUMNS
        );

        let row = sqlx::query_as::<sqlx::Postgres, BusinessPartnerRow>(&query)
            .bind(scope.company_id())
            .bind(&partner.corporate_name)
            .bind(&partner.representative)
            .bind(&partner.phone_number)
            .bind(&partner.postal_code)
            .bind(&partner.address)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error creating business partner: {}", e);
                AppError::Database(format!("Failed to create business partner: {}", e))
            })?;

        info!(partner_id = row.id, "Business partner created");
        Ok(row.into())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BusinessPartnerRow {
    id: i64,
    company_id: i64,
    corporate_name: String,
    representative: String,
    phone_number: String,
    postal_code: String,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BusinessPartnerRow> for BusinessPartner {
    fn from(row: BusinessPartnerRow) -> Self {
        BusinessPartner {
            id: row.id,
            company_id: row.company_id,
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
