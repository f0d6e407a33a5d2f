//! Password hashing and verification using Argon2id

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::OnceCell;
use rand_core::OsRng;
use superpay_core::error::AppError;
use tracing::{debug, error};

/// Argon2 password hashing service
#[derive(Debug, Clone, Default)]
pub struct PasswordService {
    argon2: Argon2<'static>,
    /// Hash verified against when the account does not exist
    decoy_hash: OnceCell<String>,
}

impl PasswordService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a password with a fresh random salt (PHC string format)
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "Failed to hash password");
                AppError::PasswordHash(format!("Password hashing failed: {}", e))
            })?;

        Ok(password_hash.to_string())
    }

    /// Check a password against a stored hash
    ///
    /// A wrong password is `Ok(false)`; a malformed hash is an error.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            error!(error = %e, "Failed to parse password hash");
            AppError::PasswordHash(format!("Invalid password hash format: {}", e))
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed: incorrect password");
                Ok(false)
            }
            Err(e) => {
                error!(error = %e, "Password verification error");
                Err(AppError::PasswordHash(format!(
                    "Password verification failed: {}",
                    e
                )))
            }
        }
    }

    /// Verify login credentials, mapping a mismatch to `InvalidCredentials`
    pub fn check_credentials(&self, password: &str, hash: &str) -> Result<(), AppError> {
        if self.verify_password(password, hash)? {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }

    /// Reject a login for an unknown account
    ///
    /// Runs a full Argon2 verification against a decoy hash so the response
    /// takes as long as a wrong password would.
    pub fn reject_unknown_account(&self, password: &str) -> AppError {
        match self
            .decoy_hash
            .get_or_try_init(|| self.hash_password("decoy-password"))
        {
            Ok(hash) => {
                let _ = self.verify_password(password, hash);
            }
            Err(e) => debug!("Decoy hash unavailable: {}", e),
        }
        AppError::InvalidCredentials
    }
}
