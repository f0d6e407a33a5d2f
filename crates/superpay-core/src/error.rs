//! Unified error handling for SuperPay
//!
//! Every layer converts its failures into [`AppError`], which knows how to
//! render itself as an HTTP response.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Main application error type
///
/// Tenant violations surface as `NotFound` on reads and `Forbidden` on
/// invoice creation; both render as 404 so other tenants' records are never
/// confirmed to exist.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Persistence Errors ====================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Database pool error: {0}")]
    Pool(String),

    // ==================== Authentication Errors ====================
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    // ==================== Business Logic Errors ====================
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    #[error("Business partner not found: {0}")]
    BusinessPartnerNotFound(String),

    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ==================== Resource Errors ====================
    #[error("Not found: {0}")]
    NotFound(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,

            // 401 Unauthorized
            AppError::InvalidCredentials
            | AppError::InvalidToken(_)
            | AppError::TokenExpired
            | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,

            // 404 Not Found (tenant violations included)
            AppError::Forbidden(_)
            | AppError::InvoiceNotFound(_)
            | AppError::BusinessPartnerNotFound(_)
            | AppError::CompanyNotFound(_)
            | AppError::NotFound(_) => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::Pool(_) => "pool_error",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::TokenExpired => "token_expired",
            AppError::InvalidToken(_) => "invalid_token",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::PasswordHash(_) => "password_error",
            AppError::InvoiceNotFound(_) => "invoice_not_found",
            AppError::BusinessPartnerNotFound(_) => "business_partner_not_found",
            AppError::CompanyNotFound(_) => "company_not_found",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound(_) => "not_found",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }

    /// True for failures of the underlying store
    pub fn is_persistence(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::Pool(_))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::Validation("amount".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvoiceNotFound("7".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Database("connection reset".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_tenant_violation_renders_as_not_found() {
        let err = AppError::Forbidden("business partner does not belong to your company".into());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "forbidden");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::InvalidCredentials.error_code(),
            "invalid_credentials"
        );
        assert_eq!(
            AppError::BusinessPartnerNotFound("3".to_string()).error_code(),
            "business_partner_not_found"
        );
    }

    #[test]
    fn test_persistence_classification() {
        assert!(AppError::Database("x".into()).is_persistence());
        assert!(AppError::Pool("x".into()).is_persistence());
        assert!(!AppError::NotFound("x".into()).is_persistence());
    }

    #[test]
    fn test_validation_errors_conversion() {
        let err: AppError = validator::ValidationErrors::new().into();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
