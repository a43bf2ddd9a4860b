//! Password hashing via bcrypt.

use super::AuthError;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// Hash a password with bcrypt (cost 10).
///
/// Each call salts independently, so two hashes of the same password differ.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a stored bcrypt hash.
///
/// Returns `false` for a mismatch and for malformed stored hashes alike;
/// bad input never surfaces as an error to callers.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let hash = hash_password("correct-password").unwrap();
        assert!(verify_password("correct-password", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn hashing_is_salted() {
        let a = hash_password("correct-password").unwrap();
        let b = hash_password("correct-password").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("correct-password", &a));
        assert!(verify_password("correct-password", &b));
    }

    #[test]
    fn malformed_stored_hash_is_a_mismatch_not_an_error() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
        assert!(!verify_password("anything", ""));
    }
}
