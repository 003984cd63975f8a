//! Password Hashing and Verification
//!
//! Password handling for credential storage:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Work factor fixed when the hasher is built, never per call
//! - Zeroization of clear-text material
//! - Constant-time comparison (inside `argon2`)
//!
//! ## Security Features
//! - Memory-hard hashing prevents GPU/ASIC attacks
//! - Per-record random salt defeats precomputed tables
//! - Pepper support for additional security layer
//! - Dummy verification for unknown accounts keeps timing uniform

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Constants
// ============================================================================

/// Maximum accepted password length in characters
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Memory cost in KiB (OWASP: m=19456, t=2, p=1)
pub const MEMORY_COST_KIB: u32 = 19 * 1024;

/// Degree of parallelism
pub const PARALLELISM: u32 = 1;

/// Lowest accepted work factor (Argon2 iterations)
pub const MIN_HASH_COST: u32 = 1;

/// Highest accepted work factor; bounds worst-case CPU per request
pub const MAX_HASH_COST: u32 = 10;

/// Input hashed once at construction for dummy verification
const DUMMY_PASSWORD: &str = "dummy-password-for-timing-equalization";

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Work factor outside the accepted range
    #[error("Hash cost must be within {MIN_HASH_COST}..={MAX_HASH_COST} (got {0})")]
    InvalidCost(u32),

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("S3cret!".to_string());
/// assert_eq!(format!("{:?}", password), "ClearTextPassword(\"[REDACTED]\")");
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap a raw password
    ///
    /// Unicode is normalized using NFKC so visually identical input typed on
    /// different keyboards hashes identically. The raw buffer is wiped.
    pub fn new(mut raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string carries algorithm, version, parameters and salt, so a
/// hash stays verifiable after the configured cost changes.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id hasher with a fixed work factor
///
/// `cost` maps to Argon2 iterations; memory and parallelism follow the
/// OWASP baseline. Building a hasher performs one hash (for the dummy
/// verification target), so build it once at startup and share it.
///
/// ## Examples
/// ```rust
/// use platform::password::{Argon2Hasher, ClearTextPassword};
///
/// let hasher = Argon2Hasher::new(1, None).unwrap();
/// let password = ClearTextPassword::new("S3cret!".to_string());
/// let hashed = hasher.hash(&password).unwrap();
/// assert!(hasher.verify(&hashed, &password));
/// ```
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
    pepper: Option<Zeroizing<Vec<u8>>>,
    dummy: HashedPassword,
}

impl Argon2Hasher {
    /// Build a hasher
    ///
    /// ## Arguments
    /// * `cost` - Argon2 iterations, within [`MIN_HASH_COST`]..=[`MAX_HASH_COST`]
    /// * `pepper` - Optional application-wide secret appended before hashing
    pub fn new(cost: u32, pepper: Option<Vec<u8>>) -> Result<Self, PasswordHashError> {
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&cost) {
            return Err(PasswordHashError::InvalidCost(cost));
        }

        let params = Params::new(MEMORY_COST_KIB, cost, PARALLELISM, None)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        let mut hasher = Self {
            params,
            pepper: pepper.map(Zeroizing::new),
            dummy: HashedPassword {
                hash: String::new(),
            },
        };
        hasher.dummy = hasher.hash(&ClearTextPassword::new(DUMMY_PASSWORD.to_string()))?;

        Ok(hasher)
    }

    /// Configured work factor
    pub fn cost(&self) -> u32 {
        self.params.t_cost()
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    fn peppered(&self, password: &ClearTextPassword) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(password.as_bytes().to_vec());
        if let Some(pepper) = &self.pepper {
            bytes.extend_from_slice(pepper);
        }
        bytes
    }

    /// Hash with a fresh 128-bit random salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let bytes = self.peppered(password);

        let hash = self
            .argon2()
            .hash_password(&bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Verify a password against a stored hash
    ///
    /// Parameters are read from the PHC string. An unparsable hash never
    /// verifies.
    pub fn verify(&self, hashed: &HashedPassword, password: &ClearTextPassword) -> bool {
        let parsed_hash = match PasswordHash::new(&hashed.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        let bytes = self.peppered(password);

        self.argon2().verify_password(&bytes, &parsed_hash).is_ok()
    }

    /// Spend the same work as [`Argon2Hasher::verify`] and return `false`
    ///
    /// Used when no account matches so the response time does not reveal
    /// whether the account exists.
    pub fn verify_dummy(&self, password: &ClearTextPassword) -> bool {
        let _ = self.verify(&self.dummy, password);
        false
    }
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("cost", &self.cost())
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2Hasher {
        Argon2Hasher::new(MIN_HASH_COST, None).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let password = ClearTextPassword::new("TestPassword123!".to_string());
        let hashed = hasher.hash(&password).unwrap();

        assert!(hasher.verify(&hashed, &password));

        let wrong = ClearTextPassword::new("WrongPassword123!".to_string());
        assert!(!hasher.verify(&hashed, &wrong));
    }

    #[test]
    fn test_salt_is_random() {
        let hasher = hasher();
        let password = ClearTextPassword::new("same input".to_string());

        let a = hasher.hash(&password).unwrap();
        let b = hasher.hash(&password).unwrap();
        assert_ne!(a.as_phc_string(), b.as_phc_string());
    }

    #[test]
    fn test_cost_is_encoded_in_hash() {
        let hasher = Argon2Hasher::new(3, None).unwrap();
        let hashed = hasher.hash(&ClearTextPassword::new("pw".to_string())).unwrap();

        assert_eq!(hasher.cost(), 3);
        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hashed.as_phc_string().contains("t=3"));
    }

    #[test]
    fn test_verify_across_costs() {
        let password = ClearTextPassword::new("TestPassword123!".to_string());
        let hashed = Argon2Hasher::new(2, None).unwrap().hash(&password).unwrap();

        assert!(hasher().verify(&hashed, &password));
    }

    #[test]
    fn test_invalid_cost() {
        assert!(matches!(
            Argon2Hasher::new(0, None),
            Err(PasswordHashError::InvalidCost(0))
        ));
        assert!(matches!(
            Argon2Hasher::new(MAX_HASH_COST + 1, None),
            Err(PasswordHashError::InvalidCost(_))
        ));
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = ClearTextPassword::new("TestPassword123!".to_string());
        let peppered = Argon2Hasher::new(1, Some(b"my_secret_pepper".to_vec())).unwrap();
        let hashed = peppered.hash(&password).unwrap();

        assert!(peppered.verify(&hashed, &password));
        assert!(!hasher().verify(&hashed, &password));

        let wrong_pepper = Argon2Hasher::new(1, Some(b"wrong_pepper".to_vec())).unwrap();
        assert!(!wrong_pepper.verify(&hashed, &password));
    }

    #[test]
    fn test_verify_dummy_never_succeeds() {
        let hasher = hasher();
        let password = ClearTextPassword::new(DUMMY_PASSWORD.to_string());
        assert!(!hasher.verify_dummy(&password));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let hasher = hasher();
        let password = ClearTextPassword::new("TestPassword123!".to_string());
        let hashed = hasher.hash(&password).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(hasher.verify(&restored, &password));
    }

    #[test]
    fn test_invalid_phc_string() {
        let result = HashedPassword::from_phc_string("not_a_valid_hash");
        assert!(matches!(result, Err(PasswordHashError::InvalidHashFormat)));
    }

    #[test]
    fn test_nfkc_normalization() {
        let hasher = hasher();
        // Fullwidth "ＡＢＣ" normalizes to "ABC"
        let fullwidth = ClearTextPassword::new("\u{FF21}\u{FF22}\u{FF23}".to_string());
        let ascii = ClearTextPassword::new("ABC".to_string());

        let hashed = hasher.hash(&fullwidth).unwrap();
        assert!(hasher.verify(&hashed, &ascii));
        assert_eq!(fullwidth.as_bytes(), b"ABC");
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hashed = hasher().hash(&password).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2"));

        let peppered = Argon2Hasher::new(1, Some(b"pepper".to_vec())).unwrap();
        assert!(format!("{:?}", peppered).contains("[REDACTED]"));
    }
}
