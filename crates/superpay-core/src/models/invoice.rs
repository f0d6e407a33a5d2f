//! Invoice model
//!
//! An invoice records a principal owed to a business partner together with
//! the service fee and consumption tax derived from it at creation time.

use super::{BusinessPartner, Company};
use crate::error::AppError;
use crate::money::{compute_invoice, InvoiceRates};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Invoice processing status
///
/// New invoices always start as `Unprocessed`; the other states are set by
/// the payment processor outside this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Unprocessed,
    Processing,
    Paid,
    Error,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InvoiceStatus {
    /// Stored/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Unprocessed => "unprocessed",
            InvoiceStatus::Processing => "processing",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Error => "error",
        }
    }

    /// Parse from the stored representation (exact match)
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "unprocessed" => Some(InvoiceStatus::Unprocessed),
            "processing" => Some(InvoiceStatus::Processing),
            "paid" => Some(InvoiceStatus::Paid),
            "error" => Some(InvoiceStatus::Error),
            _ => None,
        }
    }
}

/// Invoice entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: i64,

    /// Issuing company (tenant)
    pub company_id: i64,

    /// Billed business partner
    pub business_partner_id: i64,

    /// When the invoice was issued
    pub issue_date: DateTime<Utc>,

    /// Principal amount
    pub payment_amount: Decimal,

    /// Service fee (not rounded)
    pub fee: Decimal,

    /// Fee rate applied to the principal
    pub fee_rate: Decimal,

    /// Consumption tax on the fee (not rounded)
    pub consumption_tax: Decimal,

    /// Tax rate applied to the fee
    pub consumption_tax_rate: Decimal,

    /// Total billed, rounded to 2 places
    pub invoice_amount: Decimal,

    /// Payment deadline
    pub payment_due_date: DateTime<Utc>,

    /// Processing status
    pub status: InvoiceStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Default for Invoice {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            company_id: 0,
            business_partner_id: 0,
            issue_date: now,
            payment_amount: Decimal::ZERO,
            fee: Decimal::ZERO,
            fee_rate: Decimal::ZERO,
            consumption_tax: Decimal::ZERO,
            consumption_tax_rate: Decimal::ZERO,
            invoice_amount: Decimal::ZERO,
            payment_due_date: now,
            status: InvoiceStatus::Unprocessed,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A priced invoice ready to be persisted
///
/// Only [`NewInvoice::priced`] builds one, so the derived amounts always come
/// from the calculation engine. The owning company is supplied by the
/// repository from the tenant scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub business_partner_id: i64,
    pub issue_date: DateTime<Utc>,
    pub payment_amount: Decimal,
    pub fee: Decimal,
    pub fee_rate: Decimal,
    pub consumption_tax: Decimal,
    pub consumption_tax_rate: Decimal,
    pub invoice_amount: Decimal,
    pub payment_due_date: DateTime<Utc>,
    pub status: InvoiceStatus,
}

impl NewInvoice {
    /// Price a new invoice issued at `issue_date`
    ///
    /// Fails with `Validation` when the principal is too large for the
    /// derived amounts to be represented.
    pub fn priced(
        business_partner_id: i64,
        payment_amount: Decimal,
        payment_due_date: DateTime<Utc>,
        issue_date: DateTime<Utc>,
        rates: InvoiceRates,
    ) -> Result<Self, AppError> {
        let breakdown =
            compute_invoice(payment_amount, rates.fee_rate, rates.consumption_tax_rate)
                .ok_or_else(|| {
                    AppError::Validation("payment amount is too large to price".to_string())
                })?;

        Ok(Self {
            business_partner_id,
            issue_date,
            payment_amount,
            fee: breakdown.fee,
            fee_rate: rates.fee_rate,
            consumption_tax: breakdown.consumption_tax,
            consumption_tax_rate: rates.consumption_tax_rate,
            invoice_amount: breakdown.total,
            payment_due_date,
            status: InvoiceStatus::Unprocessed,
        })
    }
}

/// An invoice joined with its company and business partner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDetail {
    pub invoice: Invoice,
    pub company: Company,
    pub business_partner: BusinessPartner,
}
