//! Token Issuer Contract
//!
//! Builds and signs bearer tokens. Issuing is synchronous and cheap (one
//! HMAC), so implementations run inline on the caller's task.

use std::time::Duration;
use thiserror::Error;

use crate::domain::entity::{app::App, user::User};
use crate::domain::repository::BoxError;
use crate::domain::value_object::app_id::AppId;

/// Token signing errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// The app has no signing key and no fallback is configured
    #[error("no signing key for app {0}")]
    MissingKey(AppId),

    #[error("token signing failed")]
    Signing(#[source] BoxError),
}

/// Signs tokens scoped to one user and one app
pub trait TokenIssuer: Send + Sync {
    /// Issue a token for `user` valid at `app` for `ttl`
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError>;
}
