//! Login and session lookup

use crate::repositories::Repositories;
use crate::tenant::resolve_scope;
use std::sync::Arc;
use superpay_auth::{JwtService, PasswordService};
use superpay_core::{
    models::{Company, User},
    AppError, AppResult,
};
use tracing::{info, instrument};

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub expires_in: i64,
    pub user: User,
    pub company: Company,
}

/// Credential checks and token issuance
pub struct AuthService {
    repos: Repositories,
    jwt: Arc<JwtService>,
    passwords: Arc<PasswordService>,
}

impl AuthService {
    pub fn new(
        repos: Repositories,
        jwt: Arc<JwtService>,
        passwords: Arc<PasswordService>,
    ) -> Self {
        Self {
            repos,
            jwt,
            passwords,
        }
    }

    /// Authenticate by email and password and issue a bearer token
    ///
    /// Unknown emails and wrong passwords are indistinguishable.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let user = match self.repos.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                info!("Login failed: unknown email");
                return Err(self.passwords.reject_unknown_account(password));
            }
        };

        self.passwords
            .check_credentials(password, &user.password_hash)
            .map_err(|e| {
                info!(user_id = user.id, "Login failed: {}", e);
                e
            })?;

        let company = self.company_of(&user).await?;
        let token = self.jwt.create_token_for_user(&user)?;

        info!(user_id = user.id, company_id = user.company_id, "Login successful");

        Ok(LoginOutcome {
            token,
            expires_in: self.jwt.expiration_secs(),
            user,
            company,
        })
    }

    /// Current user and company for an authenticated caller
    #[instrument(skip(self))]
    pub async fn me(&self, acting_user_id: i64) -> AppResult<(User, Company)> {
        let (user, _) = resolve_scope(self.repos.users.as_ref(), acting_user_id).await?;
        let company = self.company_of(&user).await?;
        Ok((user, company))
    }

    async fn company_of(&self, user: &User) -> AppResult<Company> {
        self.repos
            .companies
            .find_by_id(user.company_id)
            .await?
            .ok_or_else(|| AppError::CompanyNotFound(user.company_id.to_string()))
    }
}
