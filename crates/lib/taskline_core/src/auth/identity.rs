//! Identity resolution for verified session claims.

use sqlx::PgPool;

use super::{AuthError, queries};
use crate::models::auth::{SessionClaims, User};

/// Look up the durable user record behind a verified claim set.
///
/// Always re-fetches from the store — tokens cannot be revoked, so account
/// deletion has to be observed here. `None` means the account no longer
/// exists; callers treat that exactly like an invalid token.
pub async fn resolve(pool: &PgPool, claims: &SessionClaims) -> Result<Option<User>, AuthError> {
    queries::find_user_by_id(pool, &claims.sub).await
}
