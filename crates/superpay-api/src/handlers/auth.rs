//! Authentication handlers

use crate::dto::{ApiResponse, LoginRequest, LoginResponse, MeResponse};
use actix_web::{cookie::Cookie, web, HttpResponse};
use chrono::{TimeZone, Utc};
use superpay_auth::AuthenticatedUser;
use superpay_core::models::UserInfo;
use superpay_core::AppError;
use superpay_services::AuthService;
use tracing::{debug, instrument, warn};
use validator::Validate;

/// Login endpoint
///
/// POST /api/auth/login
#[instrument(skip(auth_service, req))]
pub async fn login(
    auth_service: web::Data<AuthService>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Login validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let outcome = auth_service.login(&req.email, &req.password).await?;

    let cookie = Cookie::build("token", outcome.token.clone())
        .path("/")
        .http_only(true)
        .max_age(actix_web::cookie::time::Duration::seconds(outcome.expires_in))
        .finish();

    let response = LoginResponse::new(
        outcome.token,
        outcome.expires_in,
        UserInfo::from(outcome.user),
        outcome.company.into(),
    );

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::with_message(response, "login successful")))
}

/// Current user info
///
/// GET /api/auth/me
#[instrument(skip(auth_service, user), fields(user_id = user.user_id))]
pub async fn me(
    auth_service: web::Data<AuthService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    debug!("Getting current user info");

    let (db_user, company) = auth_service.me(user.user_id).await?;
    let token_expires_at = Utc
        .timestamp_opt(user.claims.exp, 0)
        .single()
        .unwrap_or_else(Utc::now);

    let response = MeResponse {
        user: UserInfo::from(db_user),
        company: company.into(),
        token_expires_at,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Configure auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/me", web::get().to(me)),
    );
}
