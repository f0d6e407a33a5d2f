//! Business partner handlers

use crate::dto::{ApiResponse, BusinessPartnerResponse, CreateBusinessPartnerRequest};
use actix_web::{web, HttpResponse};
use superpay_auth::AuthenticatedUser;
use superpay_core::AppError;
use superpay_services::BusinessPartnerService;
use tracing::{instrument, warn};
use validator::Validate;

/// Register a business partner
///
/// POST /api/business-partners
#[instrument(skip(service, user, req), fields(user_id = user.user_id))]
pub async fn create_business_partner(
    service: web::Data<BusinessPartnerService>,
    user: AuthenticatedUser,
    req: web::Json<CreateBusinessPartnerRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Business partner validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let partner = service
        .create_business_partner(user.user_id, req.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        BusinessPartnerResponse::from(partner),
        "business partner created successfully",
    )))
}

/// List the caller's business partners
///
/// GET /api/business-partners
#[instrument(skip(service, user), fields(user_id = user.user_id))]
pub async fn list_business_partners(
    service: web::Data<BusinessPartnerService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let partners: Vec<BusinessPartnerResponse> = service
        .list_business_partners(user.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        partners,
        "business partners retrieved successfully",
    )))
}

/// Configure business partner routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/business-partners")
            .route(web::get().to(list_business_partners))
            .route(web::post().to(create_business_partner)),
    );
}
