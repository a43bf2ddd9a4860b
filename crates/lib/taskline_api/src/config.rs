//! API server configuration.

use thiserror::Error;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub pg_connection_url: String,
    /// Session token signing secret. The edge gate and the login flow both
    /// read this one value — it is never duplicated elsewhere.
    pub jwt_secret: String,
    /// Whether session cookies carry the `Secure` flag (on in production).
    pub secure_cookies: bool,
}

/// Fatal configuration errors. These prevent startup entirely and are never
/// surfaced per-request.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET (or AUTH_SECRET) must be set and non-empty")]
    MissingJwtSecret,
}

/// Resolve the signing secret: env var `JWT_SECRET`, then `AUTH_SECRET`.
///
/// There is no generated fallback — a missing secret refuses startup rather
/// than failing on the first login.
pub fn require_jwt_secret() -> Result<String, ConfigError> {
    std::env::var("JWT_SECRET")
        .or_else(|_| std::env::var("AUTH_SECRET"))
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or(ConfigError::MissingJwtSecret)
}

/// Whether to set the `Secure` flag on session cookies (`APP_ENV=production`).
pub fn secure_cookies_from_env() -> bool {
    std::env::var("APP_ENV").is_ok_and(|env| env == "production")
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable                     | Default                                 |
    /// |------------------------------|-----------------------------------------|
    /// | `BIND_ADDR`                  | `127.0.0.1:3100`                        |
    /// | `DATABASE_URL`               | `postgres://localhost:5432/taskline`    |
    /// | `JWT_SECRET` / `AUTH_SECRET` | required, no default                    |
    /// | `APP_ENV`                    | `development`                           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3100".into()),
            pg_connection_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/taskline".into()),
            jwt_secret: require_jwt_secret()?,
            secure_cookies: secure_cookies_from_env(),
        })
    }
}
