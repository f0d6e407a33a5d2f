//! Business partner service

use crate::repositories::Repositories;
use crate::tenant::resolve_scope;
use superpay_core::{
    models::{BusinessPartner, NewBusinessPartner},
    validation::{validate_phone_number, validate_postal_code},
    AppError, AppResult,
};
use tracing::{info, instrument, warn};

/// Registration and listing of a company's business partners
pub struct BusinessPartnerService {
    repos: Repositories,
}

impl BusinessPartnerService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Register a partner under the acting user's company
    #[instrument(skip(self, partner))]
    pub async fn create_business_partner(
        &self,
        acting_user_id: i64,
        partner: NewBusinessPartner,
    ) -> AppResult<BusinessPartner> {
        let (_, scope) = resolve_scope(self.repos.users.as_ref(), acting_user_id).await?;

        Self::validate(&partner).map_err(|e| {
            warn!(error = %e, "Rejected business partner");
            e
        })?;

        let created = self.repos.partners.create(&scope, &partner).await?;
        info!(
            partner_id = created.id,
            company_id = scope.company_id(),
            "Business partner registered"
        );

        Ok(created)
    }

    /// All partners of the acting user's company, in registration order
    #[instrument(skip(self))]
    pub async fn list_business_partners(
        &self,
        acting_user_id: i64,
    ) -> AppResult<Vec<BusinessPartner>> {
        let (_, scope) = resolve_scope(self.repos.users.as_ref(), acting_user_id).await?;
        self.repos.partners.list_by_company(&scope).await
    }

    fn validate(partner: &NewBusinessPartner) -> AppResult<()> {
        let required = [
            ("corporate_name", &partner.corporate_name),
            ("representative", &partner.representative),
            ("address", &partner.address),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{} is required", field)));
            }
        }

        validate_phone_number(&partner.phone_number)?;
        validate_postal_code(&partner.postal_code)
    }
}
