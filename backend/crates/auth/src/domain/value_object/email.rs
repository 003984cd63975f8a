//! Email Value Object
//!
//! Represents an email address as the credential store keys it.
//! Comparison is case-sensitive at this layer: `Alice@example.com` and
//! `alice@example.com` are different accounts unless the store folds them.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Parse user input
    ///
    /// Only a structural check; the address is kept exactly as given.
    pub fn parse(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into();

        if email.trim().is_empty() {
            return Err(AppError::bad_request("Email is required")
                .with_action("Please enter an email address"));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        if !Self::is_valid_format(&email) {
            return Err(AppError::bad_request("Invalid email format")
                .with_action("Please enter a valid email address"));
        }

        Ok(Self(email))
    }

    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || local.len() > 64 || domain.contains('@') {
            return false;
        }

        if email.chars().any(char::is_whitespace) {
            return false;
        }

        if domain.is_empty() || !domain.contains('.') {
            return false;
        }

        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }

        !(domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']))
    }

    /// Create from a stored value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::parse("alice@example.com").is_ok());
        assert!(Email::parse("user.name@example.co.jp").is_ok());
        assert!(Email::parse("user+tag@example.com").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::parse("").is_err());
        assert!(Email::parse("   ").is_err());
        assert!(Email::parse("userexample.com").is_err());
        assert!(Email::parse("user@").is_err());
        assert!(Email::parse("@example.com").is_err());
        assert!(Email::parse("user@@example.com").is_err());
        assert!(Email::parse("user@example").is_err());
        assert!(Email::parse("user@-example.com").is_err());
        assert!(Email::parse("us er@example.com").is_err());
    }

    #[test]
    fn test_email_keeps_case() {
        let email = Email::parse("Alice@Example.COM").unwrap();
        assert_eq!(email.as_str(), "Alice@Example.COM");
        assert_ne!(email, Email::parse("alice@example.com").unwrap());
    }

    #[test]
    fn test_email_too_long() {
        let email = format!("{}@example.com", "a".repeat(250));
        assert!(Email::parse(email).is_err());
    }
}
