//! Input validation rules
//!
//! Format checks for contact details and the business rules an invoice
//! request must satisfy before it is priced.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

/// Domestic phone number: leading 0, three hyphenated groups (03-1234-5678)
pub static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0\d{1,4}-\d{1,4}-\d{4}$").expect("valid phone regex"));

/// Postal code: 123-4567
pub static POSTAL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-\d{4}$").expect("valid postal code regex"));

/// Check phone number format
pub fn validate_phone_number(phone: &str) -> Result<(), AppError> {
    if PHONE_NUMBER_RE.is_match(phone) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "invalid phone number format. Expected format: XXX-XXXX-XXXX".to_string(),
        ))
    }
}

/// Check postal code format
pub fn validate_postal_code(postal_code: &str) -> Result<(), AppError> {
    if POSTAL_CODE_RE.is_match(postal_code) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "invalid postal code format. Expected format: XXX-XXXX".to_string(),
        ))
    }
}

/// The principal must be strictly positive
pub fn validate_payment_amount(amount: Decimal) -> Result<(), AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::Validation(
            "payment amount must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// The due date must lie strictly after `now`
pub fn validate_payment_due_date(
    due_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    if due_date <= now {
        return Err(AppError::Validation(
            "payment due date must be in the future".to_string(),
        ));
    }
    Ok(())
}
