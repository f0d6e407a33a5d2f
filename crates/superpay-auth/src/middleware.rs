//! Actix-web request extractor for authenticated users
//!
//! A request is authenticated by a bearer token in the `Authorization`
//! header, or failing that a `token` cookie. Anything unverifiable is
//! rejected with 401 before a handler runs.

use crate::jwt::JwtService;
use crate::Claims;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use std::sync::Arc;
use superpay_core::error::AppError;
use tracing::{debug, warn};

/// Extract the raw token from a request
fn extract_token_from_request(req: &HttpRequest) -> Option<String> {
    if let Some(auth_header) = req.headers().get("Authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.trim().to_string());
            }
        }
    }

    req.cookie("token").map(|cookie| cookie.value().to_string())
}

/// Verified identity of the caller
///
/// Only the user ID is authoritative; services re-resolve the company from
/// storage on every request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub email: String,
    pub claims: Claims,
}

impl AuthenticatedUser {
    fn authenticate(req: &HttpRequest) -> Result<Self, AppError> {
        let jwt_service = req
            .app_data::<web::Data<Arc<JwtService>>>()
            .ok_or_else(|| {
                warn!("JwtService not found in app data");
                AppError::Unauthorized("Authentication service not configured".to_string())
            })?;

        let token = extract_token_from_request(req).ok_or_else(|| {
            debug!("No authentication token found in request");
            AppError::Unauthorized("No authentication token provided".to_string())
        })?;

        let claims = jwt_service.validate_token(&token)?;
        let user_id = claims.user_id()?;

        debug!(user_id, "User authenticated successfully");

        Ok(AuthenticatedUser {
            user_id,
            email: claims.email.clone(),
            claims,
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::authenticate(req).map_err(|e| {
            warn!(error = %e, "Authentication failed");
            e.into()
        }))
    }
}
