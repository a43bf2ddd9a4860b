//! Request handlers.

pub mod auth;
pub mod projects;
pub mod tasks;

use taskline_core::auth::identity;
use taskline_core::models::auth::User;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::gate::CurrentUser;

/// Fetch the live account behind gate-verified claims.
///
/// Tokens outlive account deletion, so every handler re-resolves on each
/// call and treats a missing account exactly like an invalid token.
pub(crate) async fn resolve_identity(state: &AppState, current: &CurrentUser) -> AppResult<User> {
    require_account(identity::resolve(&state.pool, &current.0).await?)
}

/// Map a resolver miss to the same rejection an invalid token gets. A caller
/// holding a token for a deleted account must not learn anything beyond
/// "your token no longer works".
fn require_account(user: Option<User>) -> AppResult<User> {
    user.ok_or_else(|| AppError::Unauthorized("Invalid authentication token".into()))
}

#[cfg(test)]
mod tests {
    use super::require_account;
    use crate::error::AppError;
    use taskline_core::models::auth::User;

    #[test]
    fn deleted_account_reads_as_invalid_token() {
        match require_account(None).unwrap_err() {
            AppError::Unauthorized(msg) => assert_eq!(msg, "Invalid authentication token"),
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn live_account_passes_through() {
        let user = User {
            id: "u1".into(),
            email: "a@b.com".into(),
            name: None,
        };
        assert_eq!(require_account(Some(user)).unwrap().id, "u1");
    }
}
