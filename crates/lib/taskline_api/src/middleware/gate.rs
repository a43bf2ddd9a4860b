//! Edge gate — session cookie extraction and token verification ahead of
//! all routing.
//!
//! The gate proves the token's cryptographic validity and freshness, nothing
//! more. It performs no database access: identity existence and resource
//! ownership are checked again inside each handler, so the gate stays cheap
//! even for requests aimed at resources that do not exist.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use taskline_core::auth::token::verify_session_token;
use taskline_core::models::auth::SessionClaims;

use crate::AppState;
use crate::error::AppError;
use crate::services::cookies::{self, SESSION_COOKIE};

/// Paths reachable without a session token.
const PUBLIC_PATHS: &[&str] = &[
    "/login",
    "/register",
    "/api/auth/login",
    "/api/auth/register",
];

/// Key used to store verified `SessionClaims` in request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionClaims);

/// Axum middleware applied to the whole router.
///
/// Public paths pass through regardless of token state. Everything else needs
/// a valid session cookie; a present-but-invalid cookie is additionally
/// cleared on the response so the client discards the dead token.
pub async fn request_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if is_public(&path) {
        return next.run(request).await;
    }

    let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
        debug!(%path, "no session token");
        return reject(&path, "Authentication required");
    };

    let Some(claims) = verify_session_token(&token, state.config.jwt_secret.as_bytes()) else {
        debug!(%path, "invalid session token, clearing cookie");
        let jar = jar.add(cookies::clear_session_cookie());
        return (jar, reject(&path, "Invalid authentication token")).into_response();
    };

    request.extensions_mut().insert(CurrentUser(claims));
    next.run(request).await
}

fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|p| path.starts_with(p))
}

/// API paths get a 401 body; page navigations get a redirect to the login
/// page. The body never says more than which of the two checks tripped.
fn reject(path: &str, message: &str) -> Response {
    if path.starts_with("/api") {
        AppError::Unauthorized(message.to_string()).into_response()
    } else {
        Redirect::temporary("/login").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::is_public;

    #[test]
    fn public_paths_cover_pages_and_their_api_equivalents() {
        for path in ["/login", "/register", "/api/auth/login", "/api/auth/register"] {
            assert!(is_public(path), "{path} should be public");
        }
        for path in ["/api/projects", "/api/auth/logout", "/dashboard", "/"] {
            assert!(!is_public(path), "{path} should be gated");
        }
    }
}
