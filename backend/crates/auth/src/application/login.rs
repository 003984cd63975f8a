//! Login
//!
//! Authenticates email + password and issues a token scoped to one app.

use crate::application::service::AuthService;
use crate::domain::repository::{AppProvider, StoreError, UserProvider, UserSaver};
use crate::domain::token::TokenIssuer;
use crate::domain::value_object::{app_id::AppId, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

const OP: &str = "Auth.Login";

impl<S, P, A, T> AuthService<S, P, A, T>
where
    S: UserSaver,
    P: UserProvider,
    A: AppProvider,
    T: TokenIssuer,
{
    /// Log a user in to `app_id`
    ///
    /// Unknown email and wrong password both yield
    /// [`AuthError::InvalidCredentials`], after the same hashing work. An
    /// unresolvable app yields [`AuthError::InvalidAppId`] and nothing is
    /// signed. The store is only read.
    #[tracing::instrument(name = "Auth.Login", skip_all, fields(email = %email, app_id = %app_id))]
    pub async fn login(&self, email: &str, password: String, app_id: AppId) -> AuthResult<String> {
        tracing::info!("attempting to login user");

        let password = RawPassword::new(password);

        let user = match self.user_provider.user(email).await {
            Ok(user) => Some(user),
            Err(StoreError::UserNotFound) => {
                tracing::warn!("user not found");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to get user");
                return Err(AuthError::internal(OP, e));
            }
        };

        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let password_ok = self.verify_password(OP, stored_hash, password).await?;

        let user = match user {
            Some(user) if password_ok => user,
            _ => {
                tracing::info!("invalid credentials");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let app = self.app_provider.app(app_id).await.map_err(|e| {
            match &e {
                StoreError::AppNotFound => tracing::warn!("app not found"),
                other => tracing::error!(error = %other, "failed to get app"),
            }
            AuthError::InvalidAppId
        })?;

        let token = self
            .token_issuer
            .issue(&user, &app, self.config.token_ttl)
            .map_err(|e| {
                tracing::error!(error = %e, "failed to generate token");
                AuthError::internal(OP, e)
            })?;

        tracing::info!(user_id = %user.id, "user logged in successfully");

        Ok(token)
    }
}
