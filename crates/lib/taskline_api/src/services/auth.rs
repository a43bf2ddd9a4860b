//! Authentication service — login/register flows delegating to
//! `taskline_core::auth`.

use sqlx::PgPool;
use tracing::info;

use taskline_core::auth::{password, queries, token};

use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, SessionUser};

/// Canonical form for emails. Applied at registration before storing and at
/// login before lookup, so the stored value and the lookup key always agree.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Authenticate with email + password, returning the response body and the
/// freshly signed session token.
pub async fn login(
    pool: &PgPool,
    email: &str,
    password_input: &str,
    jwt_secret: &[u8],
) -> AppResult<(AuthResponse, String)> {
    let email = normalize_email(email);
    let record = queries::find_user_by_email(pool, &email).await?;

    // Same generic rejection for unknown email and wrong password.
    let Some(record) = record else {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    };
    if !password::verify_password(password_input, &record.password_hash) {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    let token = token::issue_session_token(&record.user.id, &record.user.email, jwt_secret)?;
    info!(user_id = %record.user.id, "login succeeded");

    Ok((
        AuthResponse {
            message: "Login successful".into(),
            user: SessionUser::from(record.user),
        },
        token,
    ))
}

/// Register a new user account and sign them in.
pub async fn register(
    pool: &PgPool,
    email: &str,
    password_input: &str,
    name: Option<&str>,
    jwt_secret: &[u8],
) -> AppResult<(AuthResponse, String)> {
    let email = normalize_email(email);
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("A valid email is required".into()));
    }
    if password_input.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }
    if queries::email_exists(pool, &email).await? {
        return Err(AppError::Validation("Email already registered".into()));
    }

    let password_hash = password::hash_password(password_input)?;
    let user_id = queries::create_user(pool, &email, name, &password_hash).await?;
    let token = token::issue_session_token(&user_id, &email, jwt_secret)?;
    info!(%user_id, "registered new user");

    Ok((
        AuthResponse {
            message: "Registration successful".into(),
            user: SessionUser {
                id: user_id,
                email,
                name: name.map(|n| n.to_string()),
            },
        },
        token,
    ))
}

#[cfg(test)]
mod tests {
    use super::normalize_email;

    #[test]
    fn mixed_case_registration_email_is_reachable_at_login() {
        // Registration stores the canonical form; login must derive the
        // same form from whatever casing the user types back in.
        let stored = normalize_email("  Alice@Example.com ");
        assert_eq!(stored, "alice@example.com");
        assert_eq!(normalize_email("Alice@Example.com"), stored);
        assert_eq!(normalize_email("ALICE@EXAMPLE.COM"), stored);
        assert_eq!(normalize_email(&stored), stored);
    }
}
