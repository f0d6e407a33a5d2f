//! Invoice DTOs
//!
//! Money fields leave the API as strings with two fraction digits; dates are
//! RFC 3339.

use super::business_partner::{BusinessPartnerResponse, CompanyResponse};
use super::common::serialize_money;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use superpay_core::models::{InvoiceDetail, InvoiceStatus};
use superpay_core::{AppError, InvoiceFilter, Pagination};
use superpay_services::CreateInvoiceInput;
use validator::Validate;

/// Invoice creation request
///
/// Only the principal, due date and partner are accepted; unknown fields
/// such as `fee` or `invoice_amount` are ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    #[validate(range(min = 1, message = "business_partner_id is required"))]
    pub business_partner_id: i64,

    pub payment_amount: Decimal,

    pub payment_due_date: DateTime<Utc>,
}

impl From<CreateInvoiceRequest> for CreateInvoiceInput {
    fn from(req: CreateInvoiceRequest) -> Self {
        CreateInvoiceInput {
            business_partner_id: req.business_partner_id,
            payment_amount: req.payment_amount,
            payment_due_date: req.payment_due_date,
        }
    }
}

/// Invoice listing query parameters
///
/// Non-numeric or non-positive `page`/`limit` fall back to the defaults;
/// malformed dates are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceListParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(field: &str, value: &Option<String>) -> Result<Option<DateTime<Utc>>, AppError> {
    non_empty(value)
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| AppError::Validation(format!("Invalid {} format: {}", field, e)))
        })
        .transpose()
}

fn parse_count(value: &Option<String>) -> i64 {
    non_empty(value)
        .and_then(|raw| raw.parse::<i64>().ok())
        .unwrap_or(0)
}

impl InvoiceListParams {
    /// Split into a filter and raw (not yet normalized) pagination
    pub fn into_query(self) -> Result<(InvoiceFilter, Pagination), AppError> {
        let filter = InvoiceFilter {
            start_date: parse_date("start_date", &self.start_date)?,
            end_date: parse_date("end_date", &self.end_date)?,
            status: non_empty(&self.status).map(str::to_string),
        };
        let pagination = Pagination::new(parse_count(&self.page), parse_count(&self.limit));

        Ok((filter, pagination))
    }
}

/// Invoice as returned by the API, with its company and partner
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceResponse {
    pub id: i64,
    pub company_id: i64,
    pub business_partner_id: i64,
    pub issue_date: DateTime<Utc>,
    #[serde(serialize_with = "serialize_money")]
    pub payment_amount: Decimal,
    #[serde(serialize_with = "serialize_money")]
    pub fee: Decimal,
    pub fee_rate: Decimal,
    #[serde(serialize_with = "serialize_money")]
    pub consumption_tax: Decimal,
    pub consumption_tax_rate: Decimal,
    #[serde(serialize_with = "serialize_money")]
    pub invoice_amount: Decimal,
    pub payment_due_date: DateTime<Utc>,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub company: CompanyResponse,
    pub business_partner: BusinessPartnerResponse,
}

impl From<InvoiceDetail> for InvoiceResponse {
    fn from(detail: InvoiceDetail) -> Self {
        let i = detail.invoice;
        Self {
            id: i.id,
            company_id: i.company_id,
            business_partner_id: i.business_partner_id,
            issue_date: i.issue_date,
            payment_amount: i.payment_amount,
            fee: i.fee,
            fee_rate: i.fee_rate,
            consumption_tax: i.consumption_tax,
            consumption_tax_rate: i.consumption_tax_rate,
            invoice_amount: i.invoice_amount,
            payment_due_date: i.payment_due_date,
            status: i.status,
            created_at: i.created_at,
            updated_at: i.updated_at,
            company: detail.company.into(),
            business_partner: detail.business_partner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use superpay_core::models::{BusinessPartner, Company, Invoice};

    #[test]
    fn test_create_request_ignores_derived_fields() {
        let json = r#"{
            "business_partner_id": 4,
            "payment_amount": "12345",
            "payment_due_date": "2026-12-31T00:00:00Z",
            "fee": "0",
            "invoice_amount": "1"
        }"#;

        let req: CreateInvoiceRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_ok());

        let input = CreateInvoiceInput::from(req);
        assert_eq!(input.payment_amount, dec!(12345));
        assert_eq!(
            input.payment_due_date,
            Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_list_params_defaults() {
        let (filter, pagination) = InvoiceListParams::default().into_query().unwrap();
        assert_eq!(filter, InvoiceFilter::default());
        assert_eq!(pagination.normalized(), Pagination::new(1, 20));
    }

    #[test]
    fn test_list_params_parsing() {
        let params = InvoiceListParams {
            start_date: Some("2026-01-01T00:00:00+09:00".to_string()),
            end_date: Some("".to_string()),
            status: Some("paid".to_string()),
            page: Some("abc".to_string()),
            limit: Some("500".to_string()),
        };

        let (filter, pagination) = params.into_query().unwrap();
        assert_eq!(
            filter.start_date,
            Some(Utc.with_ymd_and_hms(2025, 12, 31, 15, 0, 0).unwrap())
        );
        assert_eq!(filter.end_date, None);
        assert_eq!(filter.status.as_deref(), Some("paid"));
        assert_eq!(pagination.normalized(), Pagination::new(1, 100));
    }

    #[test]
    fn test_list_params_bad_date() {
        let params = InvoiceListParams {
            end_date: Some("2026-13-45".to_string()),
            ..Default::default()
        };
        assert!(matches!(params.into_query(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_response_money_formatting() {
        let detail = InvoiceDetail {
            invoice: Invoice {
                id: 1,
                payment_amount: dec!(1),
                fee: dec!(0.04),
                consumption_tax: dec!(0.004),
                invoice_amount: dec!(1.04),
                fee_rate: dec!(0.04),
                consumption_tax_rate: dec!(0.10),
                ..Default::default()
            },
            company: Company::default(),
            business_partner: BusinessPartner::default(),
        };

        let json = serde_json::to_value(InvoiceResponse::from(detail)).unwrap();
        assert_eq!(json["payment_amount"], "1.00");
        assert_eq!(json["fee"], "0.04");
        assert_eq!(json["consumption_tax"], "0.00");
        assert_eq!(json["invoice_amount"], "1.04");
        assert_eq!(json["status"], "unprocessed");
    }
}
