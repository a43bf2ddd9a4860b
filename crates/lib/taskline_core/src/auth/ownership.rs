//! Per-resource ownership checks.

use thiserror::Error;

use crate::models::auth::User;

/// Resources that belong to exactly one user.
pub trait OwnedResource {
    fn owner_id(&self) -> &str;
}

/// Outcome of a failed ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The resource does not exist. Returned identically for every caller.
    #[error("resource not found")]
    NotFound,

    /// The resource exists but belongs to someone else.
    #[error("access denied")]
    Forbidden,
}

/// Authorize `user` to access `resource`, returning the resource on success.
///
/// Existence is checked before ownership: a missing id yields `NotFound` for
/// owner and non-owner alike, so a non-owner cannot probe which ids exist.
/// `Forbidden` only ever names resources that do exist under another account.
pub fn authorize_owner<R: OwnedResource>(
    user: &User,
    resource: Option<R>,
) -> Result<R, AccessError> {
    let resource = resource.ok_or(AccessError::NotFound)?;
    if resource.owner_id() != user.id {
        return Err(AccessError::Forbidden);
    }
    Ok(resource)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Doc {
        owner: String,
    }

    impl OwnedResource for Doc {
        fn owner_id(&self) -> &str {
            &self.owner
        }
    }

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            name: None,
        }
    }

    #[test]
    fn owner_is_allowed() {
        let doc = Doc { owner: "u1".into() };
        assert!(authorize_owner(&user("u1"), Some(doc)).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let doc = Doc { owner: "u2".into() };
        let err = authorize_owner(&user("u1"), Some(doc)).unwrap_err();
        assert_eq!(err, AccessError::Forbidden);
    }

    #[test]
    fn missing_resource_is_not_found_for_every_caller() {
        // Identical outcome whether the caller would have owned the id or not.
        for caller in ["u1", "u2"] {
            let err = authorize_owner::<Doc>(&user(caller), None).unwrap_err();
            assert_eq!(err, AccessError::NotFound);
        }
    }

    #[test]
    fn existence_is_checked_before_ownership() {
        // A non-owner probing a missing id must see NotFound, never Forbidden.
        let err = authorize_owner::<Doc>(&user("u2"), None).unwrap_err();
        assert_eq!(err, AccessError::NotFound);
    }
}
