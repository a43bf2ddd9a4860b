//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs over [`SessionClaims`] with a fixed 7-day lifetime.
//! There is no renewal or revocation: an issued token stays valid until its
//! embedded expiry, and a fresh login is the only way to get a new one.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use super::AuthError;
use crate::models::auth::SessionClaims;

/// Session token lifetime: 7 days.
pub const SESSION_TOKEN_LIFETIME_SECS: i64 = 7 * 24 * 60 * 60;

/// The one pinned signing algorithm. Issuance and verification both use this
/// constant; a token whose header names any other algorithm is rejected.
const SESSION_ALGORITHM: Algorithm = Algorithm::HS256;

/// Issue a signed session token for the given identity.
pub fn issue_session_token(
    user_id: &str,
    email: &str,
    secret: &[u8],
) -> Result<String, AuthError> {
    issue_session_token_at(user_id, email, secret, Utc::now())
}

fn claims_at(user_id: &str, email: &str, now: DateTime<Utc>) -> SessionClaims {
    SessionClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: (now + Duration::seconds(SESSION_TOKEN_LIFETIME_SECS)).timestamp(),
        iat: now.timestamp(),
    }
}

/// Issue a token with an explicit issue instant. `iat` lands in the payload,
/// so two tokens for the same identity issued at different instants are
/// byte-distinct and each valid until its own expiry.
pub(crate) fn issue_session_token_at(
    user_id: &str,
    email: &str,
    secret: &[u8],
    now: DateTime<Utc>,
) -> Result<String, AuthError> {
    encode(
        &Header::new(SESSION_ALGORITHM),
        &claims_at(user_id, email, now),
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Verify a session token, returning the embedded claims on success.
///
/// Rejection is a single undifferentiated `None`: empty token, bad signature,
/// wrong algorithm, expired, or a payload that does not match the expected
/// claim shape all look identical to callers. The distinction exists only in
/// debug logs.
pub fn verify_session_token(token: &str, secret: &[u8]) -> Option<SessionClaims> {
    if token.is_empty() {
        return None;
    }
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::new(SESSION_ALGORITHM);
    validation.validate_exp = true;
    validation.leeway = 0;
    match decode::<SessionClaims>(token, &key, &validation) {
        Ok(data) => {
            // The crate's exp check is exclusive (rejects only past expiry);
            // a token is already dead at the exact expiry instant.
            if data.claims.exp <= Utc::now().timestamp() {
                debug!("session token at expiry");
                return None;
            }
            Some(data.claims)
        }
        Err(e) => {
            debug!(error = %e, "session token rejected");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn issued_token_round_trips() {
        let token = issue_session_token("u1", "a@b.com", SECRET).unwrap();
        let claims = verify_session_token(&token, SECRET).expect("token should verify");
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.exp, claims.iat + SESSION_TOKEN_LIFETIME_SECS);
    }

    #[test]
    fn same_claims_at_different_instants_are_distinct_tokens() {
        let now = Utc::now();
        let t1 = issue_session_token_at("u1", "a@b.com", SECRET, now).unwrap();
        let t2 = issue_session_token_at("u1", "a@b.com", SECRET, now + Duration::seconds(1)).unwrap();
        assert_ne!(t1, t2);
        assert!(verify_session_token(&t1, SECRET).is_some());
        assert!(verify_session_token(&t2, SECRET).is_some());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_session_token("u1", "a@b.com", SECRET).unwrap();
        assert!(verify_session_token(&token, b"other-secret").is_none());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = issue_session_token("u1", "a@b.com", SECRET).unwrap();
        let mut tampered = token.into_bytes();
        let last = tampered.last_mut().unwrap();
        *last = if *last == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).unwrap();
        assert!(verify_session_token(&tampered, SECRET).is_none());
    }

    #[test]
    fn foreign_algorithm_is_rejected() {
        // Same secret, same claims, but signed under HS384 — the pinned
        // algorithm check must reject it before the signature is considered.
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims_at("u1", "a@b.com", Utc::now()),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(verify_session_token(&token, SECRET).is_none());
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(verify_session_token("", SECRET).is_none());
    }

    #[test]
    fn token_just_inside_lifetime_is_valid() {
        let issued = Utc::now() - Duration::seconds(SESSION_TOKEN_LIFETIME_SECS - 1);
        let token = issue_session_token_at("u1", "a@b.com", SECRET, issued).unwrap();
        assert!(verify_session_token(&token, SECRET).is_some());
    }

    #[test]
    fn token_at_exact_expiry_is_rejected() {
        // Expiry is inclusive: at the instant exp equals the current time the
        // token is no longer valid.
        let issued = Utc::now() - Duration::seconds(SESSION_TOKEN_LIFETIME_SECS);
        let token = issue_session_token_at("u1", "a@b.com", SECRET, issued).unwrap();
        assert!(verify_session_token(&token, SECRET).is_none());
    }

    #[test]
    fn token_just_past_lifetime_is_rejected() {
        let issued = Utc::now() - Duration::seconds(SESSION_TOKEN_LIFETIME_SECS + 1);
        let token = issue_session_token_at("u1", "a@b.com", SECRET, issued).unwrap();
        assert!(verify_session_token(&token, SECRET).is_none());
    }

    #[test]
    fn payload_with_extra_fields_is_rejected() {
        #[derive(Serialize)]
        struct WideClaims {
            sub: String,
            email: String,
            exp: i64,
            iat: i64,
            admin: bool,
        }
        let now = Utc::now();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &WideClaims {
                sub: "u1".into(),
                email: "a@b.com".into(),
                exp: (now + Duration::seconds(60)).timestamp(),
                iat: now.timestamp(),
                admin: true,
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(verify_session_token(&token, SECRET).is_none());
    }

    #[test]
    fn payload_missing_fields_is_rejected() {
        #[derive(Serialize)]
        struct NarrowClaims {
            sub: String,
            exp: i64,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NarrowClaims {
                sub: "u1".into(),
                exp: (Utc::now() + Duration::seconds(60)).timestamp(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(verify_session_token(&token, SECRET).is_none());
    }
}
