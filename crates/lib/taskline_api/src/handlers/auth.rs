//! Authentication request handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::gate::CurrentUser;
use crate::models::{
    AuthResponse, LoginRequest, MessageResponse, RegisterRequest, SessionResponse,
};
use crate::services::{auth, cookies};

/// `POST /api/auth/login` — authenticate with email + password and set the
/// session cookie.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let (resp, token) = auth::login(
        &state.pool,
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    let jar = jar.add(cookies::session_cookie(&token, state.config.secure_cookies));
    Ok((jar, Json(resp)))
}

/// `POST /api/auth/register` — create a new account and sign it in.
pub async fn register_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let (resp, token) = auth::register(
        &state.pool,
        &body.email,
        &body.password,
        body.name.as_deref(),
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    let jar = jar.add(cookies::session_cookie(&token, state.config.secure_cookies));
    Ok((StatusCode::CREATED, jar, Json(resp)))
}

/// `POST /api/auth/logout` — clear the session cookie.
///
/// Tokens have no server-side state to revoke; logout is purely discarding
/// the client's copy.
pub async fn logout_handler(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.add(cookies::clear_session_cookie());
    (
        jar,
        Json(MessageResponse {
            message: "Logged out".into(),
        }),
    )
}

/// `GET /api/auth/session` — echo the verified claims for the current
/// session. No database access; this is the claims exactly as the gate
/// verified them.
pub async fn session_handler(
    axum::Extension(user): axum::Extension<CurrentUser>,
) -> Json<SessionResponse> {
    Json(SessionResponse {
        id: user.0.sub,
        email: user.0.email,
    })
}
