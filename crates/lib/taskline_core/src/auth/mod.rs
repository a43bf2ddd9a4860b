//! Authentication and authorization logic.
//!
//! Provides password hashing, session token management, identity
//! resolution, and the per-resource ownership guard shared by all
//! request handlers.

pub mod identity;
pub mod ownership;
pub mod password;
pub mod queries;
pub mod token;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
