//! User Password Value Objects
//!
//! Domain wrappers over `platform::password`.
//!
//! - [`RawPassword`] is what a caller typed. Zeroized on drop, never logged.
//! - [`UserPassword`] is the salted Argon2id hash the store keeps. It is
//!   opaque to everything but the hasher and never leaves the service.

use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// No policy is applied here; login must accept whatever was registered.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> Self {
        Self(ClearTextPassword::new(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for storage
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Create from PHC string (from the store)
    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc_string).map(Self)
    }

    /// Get PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub(crate) fn inner(&self) -> &HashedPassword {
        &self.0
    }
}

impl From<HashedPassword> for UserPassword {
    fn from(hashed: HashedPassword) -> Self {
        Self(hashed)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::Argon2Hasher;

    #[test]
    fn test_phc_string_roundtrip() {
        let hasher = Argon2Hasher::new(1, None).unwrap();
        let raw = RawPassword::new("S3cret!".to_string());
        let hashed = UserPassword::from(hasher.hash(raw.inner()).unwrap());

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(hasher.verify(restored.inner(), raw.inner()));
    }

    #[test]
    fn test_debug_and_display_redaction() {
        let raw = RawPassword::new("SecretPassword".to_string());
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));

        let hasher = Argon2Hasher::new(1, None).unwrap();
        let hashed = UserPassword::from(hasher.hash(raw.inner()).unwrap());
        assert!(!format!("{:?}", hashed).contains("argon2"));
        assert_eq!(hashed.to_string(), "[HASHED_PASSWORD]");
    }

    #[test]
    fn test_short_passwords_are_accepted() {
        let hasher = Argon2Hasher::new(1, None).unwrap();
        let raw = RawPassword::new("x".to_string());

        let hashed = hasher.hash(raw.inner()).unwrap();
        assert!(hasher.verify(&hashed, RawPassword::new("x".to_string()).inner()));
        assert!(!hasher.verify(&hashed, RawPassword::new(String::new()).inner()));
    }
}
