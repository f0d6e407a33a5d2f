//! Acting user resolution

use superpay_core::{models::User, traits::UserRepository, AppError, AppResult, TenantScope};
use tracing::warn;

/// Load the acting user and derive their tenant scope
///
/// A token can outlive its user; a missing user is `Unauthorized`.
pub async fn resolve_scope(
    users: &dyn UserRepository,
    user_id: i64,
) -> AppResult<(User, TenantScope)> {
    let user = users.find_by_id(user_id).await?.ok_or_else(|| {
        warn!(user_id, "Acting user no longer exists");
        AppError::Unauthorized("user not found".to_string())
    })?;

    let scope = TenantScope::for_user(&user);
    Ok((user, scope))
}
