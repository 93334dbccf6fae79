//! Ownership policy shared by every owned resource.

use super::{Error, UserId};

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Forbid,
}

/// Decide whether `caller` may mutate a resource owned by `owner`.
///
/// # Examples
/// ```
/// use quiz_backend::domain::{Access, UserId, authorize};
///
/// let alice = UserId::new("alice").unwrap();
/// let bob = UserId::new("bob").unwrap();
/// assert_eq!(authorize(&alice, &alice), Access::Allow);
/// assert_eq!(authorize(&alice, &bob), Access::Forbid);
/// ```
pub fn authorize(owner: &UserId, caller: &UserId) -> Access {
    if owner == caller {
        Access::Allow
    } else {
        Access::Forbid
    }
}

/// [`authorize`] as a `Result`, failing `FORBIDDEN` with `message`.
pub fn ensure_owner(owner: &UserId, caller: &UserId, message: &str) -> Result<(), Error> {
    match authorize(owner, caller) {
        Access::Allow => Ok(()),
        Access::Forbid => Err(Error::forbidden(message)),
    }
}
