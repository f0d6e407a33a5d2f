//! Invoice handlers
//!
//! The acting user always comes from the verified token; request bodies
//! and query strings never name a company.

use crate::dto::{ApiResponse, CreateInvoiceRequest, InvoiceListParams, InvoiceResponse};
use actix_web::{web, HttpResponse};
use superpay_auth::AuthenticatedUser;
use superpay_core::AppError;
use superpay_services::InvoiceService;
use tracing::{debug, instrument, warn};
use validator::Validate;

/// Create an invoice
///
/// POST /api/invoices
#[instrument(skip(service, user, req), fields(user_id = user.user_id))]
pub async fn create_invoice(
    service: web::Data<InvoiceService>,
    user: AuthenticatedUser,
    req: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Invoice validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let detail = service
        .create_invoice(user.user_id, req.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        InvoiceResponse::from(detail),
        "invoice created successfully",
    )))
}

/// List invoices with optional filters
///
/// GET /api/invoices?start_date=&end_date=&status=&page=&limit=
#[instrument(skip(service, user, params), fields(user_id = user.user_id))]
pub async fn list_invoices(
    service: web::Data<InvoiceService>,
    user: AuthenticatedUser,
    params: web::Query<InvoiceListParams>,
) -> Result<HttpResponse, AppError> {
    let (filter, pagination) = params.into_inner().into_query()?;
    debug!(?filter, ?pagination, "Listing invoices");

    let invoices: Vec<InvoiceResponse> = service
        .list_invoices(user.user_id, filter, pagination)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        invoices,
        "invoices retrieved successfully",
    )))
}

/// Get a single invoice
///
/// GET /api/invoices/{id}
#[instrument(skip(service, user), fields(user_id = user.user_id))]
pub async fn get_invoice(
    service: web::Data<InvoiceService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let raw_id = path.into_inner();
    let invoice_id = raw_id
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::InvalidInput(format!("invalid invoice ID: {}", raw_id)))?;

    let detail = service.get_invoice(user.user_id, invoice_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        InvoiceResponse::from(detail),
        "invoice retrieved successfully",
    )))
}

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .route("", web::get().to(list_invoices))
            .route("", web::post().to(create_invoice))
            .route("/{id}", web::get().to(get_invoice)),
    );
}
