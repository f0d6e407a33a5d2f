//! Business partner and company DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use superpay_core::models::{BusinessPartner, Company, NewBusinessPartner};
use validator::Validate;

/// Business partner registration request
///
/// Phone and postal code formats are checked by the service.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBusinessPartnerRequest {
    #[validate(length(min = 1, max = 255, message = "corporate_name is required"))]
    pub corporate_name: String,

    #[validate(length(min = 1, max = 255, message = "representative is required"))]
    pub representative: String,

    #[validate(length(min = 1, max = 20, message = "phone_number is required"))]
    pub phone_number: String,

    #[validate(length(min = 1, max = 10, message = "postal_code is required"))]
    pub postal_code: String,

    #[validate(length(min = 1, max = 500, message = "address is required"))]
    pub address: String,
}

impl From<CreateBusinessPartnerRequest> for NewBusinessPartner {
    fn from(req: CreateBusinessPartnerRequest) -> Self {
        NewBusinessPartner {
            corporate_name: req.corporate_name.trim().to_string(),
            representative: req.representative.trim().to_string(),
            phone_number: req.phone_number.trim().to_string(),
            postal_code: req.postal_code.trim().to_string(),
            address: req.address.trim().to_string(),
        }
    }
}

/// Business partner as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct BusinessPartnerResponse {
    pub id: i64,
    pub company_id: i64,
    pub corporate_name: String,
    pub representative: String,
    pub phone_number: String,
    pub postal_code: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BusinessPartner> for BusinessPartnerResponse {
    fn from(p: BusinessPartner) -> Self {
        Self {
            id: p.id,
            company_id: p.company_id,
            corporate_name: p.corporate_name,
            representative: p.representative,
            phone_number: p.phone_number,
            postal_code: p.postal_code,
            address: p.address,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Company as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct CompanyResponse {
    pub id: i64,
    pub corporate_name: String,
    pub representative: String,
    pub phone_number: String,
    pub postal_code: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Company> for CompanyResponse {
    fn from(c: Company) -> Self {
        Self {
            id: c.id,
            corporate_name: c.corporate_name,
            representative: c.representative,
            phone_number: c.phone_number,
            postal_code: c.postal_code,
            address: c.address,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateBusinessPartnerRequest {
        CreateBusinessPartnerRequest {
            corporate_name: " Supplier KK ".to_string(),
            representative: "Hanako Sato".to_string(),
            phone_number: "06-123-4567".to_string(),
            postal_code: "530-0001".to_string(),
            address: "Umeda, Osaka".to_string(),
        }
    }

    #[test]
    fn test_request_validation() {
        assert!(request().validate().is_ok());

        let mut empty = request();
        empty.representative.clear();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_request_is_trimmed() {
        let partner = NewBusinessPartner::from(request());
        assert_eq!(partner.corporate_name, "Supplier KK");
    }
}
