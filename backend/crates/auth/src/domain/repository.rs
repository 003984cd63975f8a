//! Repository Traits
//!
//! Capability contracts the auth service needs from a credential store.
//! One backing store may implement all of them, but the service takes each
//! as a separate dependency and never assumes they share state.

use thiserror::Error;

use crate::domain::entity::{app::App, user::User};
use crate::domain::value_object::{app_id::AppId, user_id::UserId, user_password::UserPassword};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Signals a credential store reports
///
/// The `Backend` text is for logs only; the service never forwards it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Email already registered
    #[error("user already exists")]
    UserExists,

    #[error("user not found")]
    UserNotFound,

    #[error("app not found")]
    AppNotFound,

    /// Anything else (connection loss, timeouts, corrupt rows)
    #[error("storage backend failure: {0}")]
    Backend(#[source] BoxError),
}

impl StoreError {
    pub fn backend(err: impl Into<BoxError>) -> Self {
        StoreError::Backend(err.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persists new users
#[trait_variant::make(UserSaver: Send)]
pub trait LocalUserSaver {
    /// Insert a user and return the assigned id
    ///
    /// Must fail with [`StoreError::UserExists`] when the email is taken,
    /// atomically: of two concurrent inserts with the same email exactly one
    /// succeeds. A failed or cancelled call leaves no partial record.
    async fn save_user(&self, email: &str, password_hash: &UserPassword) -> StoreResult<UserId>;
}

/// Reads users
#[trait_variant::make(UserProvider: Send)]
pub trait LocalUserProvider {
    /// Find a user by exact email; [`StoreError::UserNotFound`] if absent
    async fn user(&self, email: &str) -> StoreResult<User>;

    /// Admin flag of a user; [`StoreError::UserNotFound`] if the id is unknown
    async fn is_admin(&self, user_id: UserId) -> StoreResult<bool>;
}

/// Reads tenant applications
#[trait_variant::make(AppProvider: Send)]
pub trait LocalAppProvider {
    /// Find an app by id; [`StoreError::AppNotFound`] if absent
    async fn app(&self, app_id: AppId) -> StoreResult<App>;
}
