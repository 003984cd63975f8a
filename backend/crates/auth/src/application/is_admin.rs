//! Is Admin
//!
//! Coarse authorization query, answered live by the store.

use crate::application::service::AuthService;
use crate::domain::repository::{AppProvider, StoreError, UserProvider, UserSaver};
use crate::domain::token::TokenIssuer;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

const OP: &str = "Auth.IsAdmin";

impl<S, P, A, T> AuthService<S, P, A, T>
where
    S: UserSaver,
    P: UserProvider,
    A: AppProvider,
    T: TokenIssuer,
{
    /// Whether `user_id` holds the admin flag
    ///
    /// An unknown id yields [`AuthError::InvalidAppId`]. No caching.
    #[tracing::instrument(name = "Auth.IsAdmin", skip_all, fields(user_id = %user_id))]
    pub async fn is_admin(&self, user_id: UserId) -> AuthResult<bool> {
        tracing::info!("checking if user is admin");

        match self.user_provider.is_admin(user_id).await {
            Ok(is_admin) => {
                tracing::info!(is_admin, "completed checking if user is admin");
                Ok(is_admin)
            }
            Err(StoreError::UserNotFound | StoreError::AppNotFound) => {
                tracing::warn!("user not found");
                Err(AuthError::InvalidAppId)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to check if user is admin");
                Err(AuthError::internal(OP, e))
            }
        }
    }
}
