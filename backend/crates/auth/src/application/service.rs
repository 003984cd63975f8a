//! Auth Service
//!
//! Orchestrates login, registration and admin lookup over the store
//! capability traits and a token issuer. The service is stateless: every
//! collaborator is injected once at construction and only read afterwards,
//! so a single instance can be shared across tasks behind an `Arc`.
//!
//! The operations live in `login.rs`, `register.rs` and `is_admin.rs`.

use std::sync::Arc;

use platform::password::{Argon2Hasher, PasswordHashError};

use crate::application::config::{AuthConfig, ConfigError};
use crate::domain::repository::{AppProvider, UserProvider, UserSaver};
use crate::domain::token::TokenIssuer;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Auth service
pub struct AuthService<S, P, A, T>
where
    S: UserSaver,
    P: UserProvider,
    A: AppProvider,
    T: TokenIssuer,
{
    pub(crate) user_saver: Arc<S>,
    pub(crate) user_provider: Arc<P>,
    pub(crate) app_provider: Arc<A>,
    pub(crate) token_issuer: Arc<T>,
    hasher: Arc<Argon2Hasher>,
    pub(crate) config: Arc<AuthConfig>,
}

impl<S, P, A, T> AuthService<S, P, A, T>
where
    S: UserSaver,
    P: UserProvider,
    A: AppProvider,
    T: TokenIssuer,
{
    /// Build the service
    ///
    /// Validates `config` and prepares the password hasher; the hash cost is
    /// fixed from here on.
    pub fn new(
        user_saver: Arc<S>,
        user_provider: Arc<P>,
        app_provider: Arc<A>,
        token_issuer: Arc<T>,
        config: AuthConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let hasher = Argon2Hasher::new(config.hash_cost, config.pepper().map(<[u8]>::to_vec))
            .map_err(|e| match e {
                PasswordHashError::InvalidCost(cost) => ConfigError::InvalidHashCost(cost),
                other => ConfigError::Hasher(other.to_string()),
            })?;

        Ok(Self {
            user_saver,
            user_provider,
            app_provider,
            token_issuer,
            hasher: Arc::new(hasher),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Hash on the blocking pool so the executor keeps serving other requests
    pub(crate) async fn hash_password(
        &self,
        op: &'static str,
        password: RawPassword,
    ) -> AuthResult<UserPassword> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(password.inner()))
            .await
            .map_err(|e| AuthError::internal(op, e))?
            .map(UserPassword::from)
            .map_err(|e| AuthError::internal(op, e))
    }

    /// Verify on the blocking pool
    ///
    /// With no stored hash a dummy verification runs instead, so unknown
    /// accounts cost the same time as wrong passwords.
    pub(crate) async fn verify_password(
        &self,
        op: &'static str,
        stored: Option<UserPassword>,
        password: RawPassword,
    ) -> AuthResult<bool> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || match stored {
            Some(hash) => hasher.verify(hash.inner(), password.inner()),
            None => hasher.verify_dummy(password.inner()),
        })
        .await
        .map_err(|e| AuthError::internal(op, e))
    }
}
