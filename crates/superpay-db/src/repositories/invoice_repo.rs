//! Invoice repository implementation
//!
//! Invoices are always read joined with their company and business partner.
//! Listing queries are assembled with `QueryBuilder` so every caller-supplied
//! value is a bound parameter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use superpay_core::{
    models::{BusinessPartner, Company, Invoice, InvoiceDetail, InvoiceStatus, NewInvoice},
    traits::InvoiceRepository,
    AppError, AppResult, InvoiceQuery, TenantScope,
};
use tracing::{debug, error, info, instrument};

/// PostgreSQL implementation of InvoiceRepository
pub struct PgInvoiceRepository {
    pool: PgPool,
}

impl PgInvoiceRepository {
    /// Create a new invoice repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const INVOICE_COLUMNS: &str = r#"
    id, company_id, business_partner_id, issue_date,
    payment_amount, fee, fee_rate,
    consumption_tax, consumption_tax_rate, invoice_amount,
    payment_due_date, status, created_at, updated_at
"#;

const INVOICE_DETAIL_SELECT: &str = r#"SELECT
    i.id, i.company_id, i.business_partner_id, i.issue_date,
    i.payment_amount, i.fee, i.fee_rate,
    i.consumption_tax, i.consumption_tax_rate, i.invoice_amount,
    i.payment_due_date, i.status, i.created_at, i.updated_at,
    c.corporate_name AS c_corporate_name, c.representative AS c_representative,
    c.phone_number AS c_phone_number, c.postal_code AS c_postal_code,
    c.address AS c_address, c.created_at AS c_created_at, c.updated_at AS c_updated_at,
    bp.corporate_name AS bp_corporate_name, bp.representative AS bp_representative,
    bp.phone_number AS bp_phone_number, bp.postal_code AS bp_postal_code,
    bp.address AS bp_address, bp.created_at AS bp_created_at, bp.updated_at AS bp_updated_at
FROM invoices i
JOIN companies c ON c.id = i.company_id
JOIN business_partners bp ON bp.id = i.business_partner_id"#;

/// Build the tenant-scoped listing query
///
/// The company predicate is always first; optional predicates follow in a
/// fixed order so the generated SQL is deterministic.
pub fn build_list_query(
    scope: &TenantScope,
    query: &InvoiceQuery,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(INVOICE_DETAIL_SELECT);

    builder
        .push(" WHERE i.company_id = ")
        .push_bind(scope.company_id());

    if let Some(start) = query.filter.start_date {
        builder.push(" AND i.payment_due_date >= ").push_bind(start);
    }

    if let Some(end) = query.filter.end_date {
        builder.push(" AND i.payment_due_date <= ").push_bind(end);
    }

    if let Some(status) = &query.filter.status {
        builder.push(" AND i.status = ").push_bind(status.clone());
    }

    builder.push(" ORDER BY i.payment_due_date DESC, i.id ASC");

    if let Some(limit) = query.pagination.limit() {
        builder.push(" LIMIT ").push_bind(limit);
    }

    if let Some(offset) = query.pagination.offset() {
        builder.push(" OFFSET ").push_bind(offset);
    }

    builder
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    #[instrument(skip(self, invoice), fields(company_id = scope.company_id()))]
    async fn create(&self, scope: &TenantScope, invoice: &NewInvoice) -> AppResult<Invoice> {
        debug!(
            "Creating invoice for business partner {}",
            invoice.business_partner_id
        );

        let query = format!(
            r#"
            INSERT INTO invoices (
                company_id, business_partner_id, issue_date,
                payment_amount, fee, fee_rate,
                consumption_tax, consumption_tax_rate, invoice_amount,
                payment_due_date, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            INVOICE_COLUMNS
        );

        let row = sqlx::query_as::<Postgres, InvoiceRow>(&query)
            .bind(scope.company_id())
            .bind(invoice.business_partner_id)
            .bind(invoice.issue_date)
            .bind(invoice.payment_amount)
            .bind(invoice.fee)
            .bind(invoice.fee_rate)
            .bind(invoice.consumption_tax)
            .bind(invoice.consumption_tax_rate)
            .bind(invoice.invoice_amount)
            .bind(invoice.payment_due_date)
            .bind(invoice.status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error creating invoice: {}", e);
                AppError::Database(format!("Failed to create invoice: {}", e))
            })?;

        info!(invoice_id = row.id, "Invoice created");
        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> AppResult<Option<InvoiceDetail>> {
        debug!("Finding invoice by id: {}", id);

        let query = format!("{} WHERE i.id = $1", INVOICE_DETAIL_SELECT);

        let result = sqlx::query_as::<Postgres, InvoiceDetailRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error finding invoice {}: {}", id, e);
                AppError::Database(format!("Failed to find invoice: {}", e))
            })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self), fields(company_id = scope.company_id()))]
    async fn list(
        &self,
        scope: &TenantScope,
        query: &InvoiceQuery,
    ) -> AppResult<Vec<InvoiceDetail>> {
        debug!("Listing invoices with {:?}", query);

        let mut builder = build_list_query(scope, query);

        let rows = builder
            .build_query_as::<InvoiceDetailRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error listing invoices: {}", e);
                AppError::Database(format!("Failed to fetch invoices: {}", e))
            })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Status values are constrained by the schema, so an unknown one can only
/// come from a manual edit; it reads back as the initial state.
fn parse_status(status: &str) -> InvoiceStatus {
    InvoiceStatus::from_str(status).unwrap_or_default()
}

#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: i64,
    company_id: i64,
    business_partner_id: i64,
    issue_date: DateTime<Utc>,
    payment_amount: Decimal,
    fee: Decimal,
    fee_rate: Decimal,
    consumption_tax: Decimal,
    consumption_tax_rate: Decimal,
    invoice_amount: Decimal,
    payment_due_date: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<InvoiceRow> for Invoice {
    fn from(row: InvoiceRow) -> Self {
        Invoice {
            id: row.id,
            company_id: row.company_id,
            business_partner_id: row.business_partner_id,
            issue_date: row.issue_date,
            payment_amount: row.payment_amount,
            fee: row.fee,
            fee_rate: row.fee_rate,
            consumption_tax: row.consumption_tax,
            consumption_tax_rate: row.consumption_tax_rate,
            invoice_amount: row.invoice_amount,
            payment_due_date: row.payment_due_date,
            status: parse_status(&row.status),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InvoiceDetailRow {
    #[sqlx(flatten)]
    invoice: InvoiceRow,
    c_corporate_name: String,
    c_representative: String,
    c_phone_number: String,
    c_postal_code: String,
    c_address: String,
    c_created_at: DateTime<Utc>,
    c_updated_at: DateTime<Utc>,
    bp_corporate_name: String,
    bp_representative: String,
    bp_phone_number: String,
    bp_postal_code: String,
    bp_address: String,
    bp_created_at: DateTime<Utc>,
    bp_updated_at: DateTime<Utc>,
}

impl From<InvoiceDetailRow> for InvoiceDetail {
    fn from(row: InvoiceDetailRow) -> Self {
        let company = Company {
            id: row.invoice.company_id,
            corporate_name: row.c_corporate_name,
            representative: row.c_representative,
            phone_number: row.c_phone_number,
            postal_code: row.c_postal_code,
            address: row.c_address,
            created_at: row.c_created_at,
            updated_at: row.c_updated_at,
        };

        let business_partner = BusinessPartner {
            id: row.invoice.business_partner_id,
            company_id: row.invoice.company_id,
            corporate_name: row.bp_corporate_name,
            representative: row.bp_representative,
            phone_number: row.bp_phone_number,
            postal_code: row.bp_postal_code,
            address: row.bp_address,
            created_at: row.bp_created_at,
            updated_at: row.bp_updated_at,
        };

        InvoiceDetail {
            invoice: row.invoice.into(),
            company,
            business_partner,
        }
    }
}
