//! App Secret Value Object
//!
//! HMAC key an app's tokens are signed with. Each tenant owns its own
//! secret so a token minted for one app cannot be replayed against another.

use std::fmt;
use zeroize::Zeroizing;

/// Per-app token signing key
#[derive(Clone)]
pub struct AppSecret(Zeroizing<Vec<u8>>);

impl AppSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// An app row without a key
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AppSecret").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_redaction() {
        let secret = AppSecret::new("super-secret");
        assert!(!format!("{:?}", secret).contains("super"));
        assert_eq!(secret.as_bytes(), b"super-secret");
    }

    #[test]
    fn test_empty_secret() {
        assert!(AppSecret::empty().is_empty());
        assert!(!AppSecret::new("k").is_empty());
    }
}
