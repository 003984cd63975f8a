//! Application Configuration
//!
//! Configuration for the Auth application layer. Fixed at service
//! construction; nothing here is influenced by callers.

use std::time::Duration;

use platform::password::{MAX_HASH_COST, MIN_HASH_COST};
use thiserror::Error;

/// Default token lifetime (1 hour)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Default Argon2 iterations (OWASP baseline)
pub const DEFAULT_HASH_COST: u32 = 2;

/// Configuration errors detected at construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("token ttl must be at least one second")]
    InvalidTokenTtl,

    /// Token timestamps are whole seconds
    #[error("token ttl must be a whole number of seconds (got {0:?})")]
    FractionalTokenTtl(Duration),

    #[error("hash cost must be within {MIN_HASH_COST}..={MAX_HASH_COST} (got {0})")]
    InvalidHashCost(u32),

    #[error("password hasher setup failed: {0}")]
    Hasher(String),
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// Adaptive-hash work factor (Argon2 iterations)
    pub hash_cost: u32,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: DEFAULT_TOKEN_TTL,
            hash_cost: DEFAULT_HASH_COST,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config for development (cheapest hashing)
    pub fn development() -> Self {
        Self {
            hash_cost: MIN_HASH_COST,
            ..Default::default()
        }
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token_ttl.as_secs() == 0 {
            return Err(ConfigError::InvalidTokenTtl);
        }
        if self.token_ttl.subsec_nanos() != 0 {
            return Err(ConfigError::FractionalTokenTtl(self.token_ttl));
        }
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&self.hash_cost) {
            return Err(ConfigError::InvalidHashCost(self.hash_cost));
        }
        Ok(())
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
