//! Register
//!
//! Creates a new user with a salted Argon2id hash.

use crate::application::service::AuthService;
use crate::domain::repository::{AppProvider, StoreError, UserProvider, UserSaver};
use crate::domain::token::TokenIssuer;
use crate::domain::value_object::{user_id::UserId, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

const OP: &str = "Auth.RegisterNewUser";

impl<S, P, A, T> AuthService<S, P, A, T>
where
    S: UserSaver,
    P: UserProvider,
    A: AppProvider,
    T: TokenIssuer,
{
    /// Register a new user
    ///
    /// Uniqueness is decided by the store: there is no existence pre-check,
    /// the insert itself reports [`StoreError::UserExists`], which surfaces
    /// as [`AuthError::UserExists`]. Nothing is retried.
    #[tracing::instrument(name = "Auth.RegisterNewUser", skip_all, fields(email = %email))]
    pub async fn register(&self, email: &str, password: String) -> AuthResult<UserId> {
        tracing::info!("registering user");

        let password_hash = self
            .hash_password(OP, RawPassword::new(password))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to generate password hash"))?;

        match self.user_saver.save_user(email, &password_hash).await {
            Ok(user_id) => {
                tracing::info!(user_id = %user_id, "user registered");
                Ok(user_id)
            }
            Err(StoreError::UserExists) => {
                tracing::warn!("user already exists");
                Err(AuthError::UserExists)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save user");
                Err(AuthError::internal(OP, e))
            }
        }
    }
}
