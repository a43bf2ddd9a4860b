//! Auth-related database queries.

use sqlx::PgPool;
use uuid::Uuid;

use super::AuthError;
use crate::models::auth::{User, UserWithPassword};

/// Fetch a user by email, including the stored password hash.
pub async fn find_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserWithPassword>, AuthError> {
    let row = sqlx::query_as::<_, (String, String, Option<String>, String)>(
        "SELECT id::text, email, name, password_hash FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id, email, name, password_hash)| UserWithPassword {
        user: User { id, email, name },
        password_hash,
    }))
}

/// Fetch a user by id. A syntactically invalid id is simply not found.
pub async fn find_user_by_id(pool: &PgPool, user_id: &str) -> Result<Option<User>, AuthError> {
    let Ok(id) = Uuid::parse_str(user_id) else {
        return Ok(None);
    };
    let row = sqlx::query_as::<_, (String, Option<String>)>(
        "SELECT email, name FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(email, name)| User {
        id: user_id.to_string(),
        email,
        name,
    }))
}

/// Check whether an email is already registered.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Create a new user, returning the user ID.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    name: Option<&str>,
    password_hash: &str,
) -> Result<String, AuthError> {
    let user_id = sqlx::query_scalar::<_, String>(
        "INSERT INTO users (email, name, password_hash) VALUES ($1, $2, $3) RETURNING id::text",
    )
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;
    Ok(user_id)
}
