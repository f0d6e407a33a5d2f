//! Invoice lifecycle service
//!
//! Validates invoice requests, checks that the referenced business partner
//! belongs to the caller's company, prices the invoice and persists it.
//! Reads and listings are confined to the caller's company.

use crate::clock::{system_clock, Clock};
use crate::constants::INVOICE_RATES;
use crate::repositories::Repositories;
use crate::tenant::resolve_scope;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use superpay_core::{
    models::{InvoiceDetail, NewInvoice},
    money::InvoiceRates,
    validation::{validate_payment_amount, validate_payment_due_date},
    AppError, AppResult, InvoiceFilter, InvoiceQuery, Pagination,
};
use tracing::{debug, info, instrument, warn};

/// Caller-supplied fields of a new invoice
///
/// Fee, tax and total are never accepted from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInvoiceInput {
    pub business_partner_id: i64,
    pub payment_amount: Decimal,
    pub payment_due_date: DateTime<Utc>,
}

/// Invoice creation and retrieval
pub struct InvoiceService {
    repos: Repositories,
    clock: Arc<dyn Clock>,
    rates: InvoiceRates,
}

impl InvoiceService {
    /// Create a new invoice service on the wall clock
    pub fn new(repos: Repositories) -> Self {
        Self::with_clock(repos, system_clock())
    }

    /// Create a new invoice service with an explicit time source
    pub fn with_clock(repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        Self {
            repos,
            clock,
            rates: INVOICE_RATES,
        }
    }

    /// Create and price an invoice for the acting user's company
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the acting user no longer exists
    /// - `Validation` for a non-positive amount, a due date not after now, or
    ///   an amount too large to price
    /// - `BusinessPartnerNotFound` if the partner does not exist
    /// - `Forbidden` if the partner belongs to another company
    /// - `Database` if the store rejects the write
    #[instrument(skip(self, input), fields(partner_id = input.business_partner_id))]
    pub async fn create_invoice(
        &self,
        acting_user_id: i64,
        input: CreateInvoiceInput,
    ) -> AppResult<InvoiceDetail> {
        let (_, scope) = resolve_scope(self.repos.users.as_ref(), acting_user_id).await?;
        let now = self.clock.now();

        validate_payment_amount(input.payment_amount).map_err(|e| {
            warn!(amount = %input.payment_amount, "Rejected invoice amount");
            e
        })?;
        validate_payment_due_date(input.payment_due_date, now).map_err(|e| {
            warn!(due = %input.payment_due_date, "Rejected invoice due date");
            e
        })?;

        let partner = self
            .repos
            .partners
            .find_by_id(input.business_partner_id)
            .await?
            .ok_or_else(|| {
                AppError::BusinessPartnerNotFound(input.business_partner_id.to_string())
            })?;

        if !scope.owns(partner.company_id) {
            warn!(
                company_id = scope.company_id(),
                partner_company_id = partner.company_id,
                "Cross-tenant business partner on invoice creation"
            );
            return Err(AppError::Forbidden(
                "business partner does not belong to your company".to_string(),
            ));
        }

        let new_invoice = NewInvoice::priced(
            partner.id,
            input.payment_amount,
            input.payment_due_date,
            now,
            self.rates,
        )?;
        debug!(
            fee = %new_invoice.fee,
            tax = %new_invoice.consumption_tax,
            total = %new_invoice.invoice_amount,
            "Priced invoice"
        );

        let invoice = self.repos.invoices.create(&scope, &new_invoice).await?;
        info!(
            invoice_id = invoice.id,
            company_id = scope.company_id(),
            "Invoice created"
        );

        self.repos
            .invoices
            .find_by_id(invoice.id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("invoice {} vanished after insert", invoice.id))
            })
    }

    /// Fetch one invoice of the acting user's company
    ///
    /// Another company's invoice is reported exactly like a missing one.
    #[instrument(skip(self))]
    pub async fn get_invoice(
        &self,
        acting_user_id: i64,
        invoice_id: i64,
    ) -> AppResult<InvoiceDetail> {
        let (_, scope) = resolve_scope(self.repos.users.as_ref(), acting_user_id).await?;

        let detail = self
            .repos
            .invoices
            .find_by_id(invoice_id)
            .await?
            .ok_or_else(|| AppError::InvoiceNotFound(invoice_id.to_string()))?;

        if !scope.owns(detail.invoice.company_id) {
            warn!(
                company_id = scope.company_id(),
                invoice_id,
                "Cross-tenant invoice read"
            );
            return Err(AppError::InvoiceNotFound(invoice_id.to_string()));
        }

        Ok(detail)
    }

    /// List the acting user's invoices
    ///
    /// Pagination is normalized (page 1, limit 20, at most 100) and the
    /// company predicate always comes from the acting user.
    #[instrument(skip(self))]
    pub async fn list_invoices(
        &self,
        acting_user_id: i64,
        filter: InvoiceFilter,
        pagination: Pagination,
    ) -> AppResult<Vec<InvoiceDetail>> {
        let (_, scope) = resolve_scope(self.repos.users.as_ref(), acting_user_id).await?;

        let query = InvoiceQuery::new(filter, pagination.normalized());
        debug!(?query, "Listing invoices");

        self.repos.invoices.list(&scope, &query).await
    }
}
