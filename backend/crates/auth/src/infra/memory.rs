//! In-Memory Credential Store
//!
//! Process-local store implementing every capability trait. Used by tests
//! and for running the HTTP surface without a database. Uniqueness is
//! enforced under the store's own lock, the same guarantee the PostgreSQL
//! unique constraint gives.

use parking_lot::{Mutex, MutexGuard};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::entity::{app::App, user::User};
use crate::domain::repository::{
    AppProvider, StoreError, StoreResult, UserProvider, UserSaver,
};
use crate::domain::value_object::{
    app_id::AppId, email::Email, user_id::UserId, user_password::UserPassword,
};

#[derive(Debug)]
struct StoredUser {
    user: User,
    is_admin: bool,
}

#[derive(Debug, Default)]
struct Inner {
    /// Index = user id - 1
    users: Vec<StoredUser>,
    by_email: HashMap<String, usize>,
    apps: HashMap<AppId, App>,
}

/// In-memory credential store
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: Mutex<Inner>,
    unavailable: AtomicBool,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style app seeding
    pub fn with_app(self, app: App) -> Self {
        self.add_app(app);
        self
    }

    pub fn add_app(&self, app: App) {
        self.lock().apps.insert(app.id, app);
    }

    /// Flip a user's admin flag
    pub fn set_admin(&self, user_id: UserId, is_admin: bool) -> StoreResult<()> {
        let mut inner = self.lock();
        let stored = Self::slot(&mut inner, user_id).ok_or(StoreError::UserNotFound)?;
        stored.is_admin = is_admin;
        Ok(())
    }

    /// Make every call fail with a backend error (outage simulation)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock()
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::backend("in-memory store marked unavailable"));
        }
        Ok(())
    }

    fn slot(inner: &mut Inner, user_id: UserId) -> Option<&mut StoredUser> {
        let index = usize::try_from(user_id.value()).ok()?.checked_sub(1)?;
        inner.users.get_mut(index)
    }
}

impl UserSaver for InMemoryCredentialStore {
    async fn save_user(&self, email: &str, password_hash: &UserPassword) -> StoreResult<UserId> {
        self.check_available()?;

        let mut inner = self.lock();
        if inner.by_email.contains_key(email) {
            return Err(StoreError::UserExists);
        }

        let index = inner.users.len();
        let id = UserId::new(index as i64 + 1);
        inner.users.push(StoredUser {
            user: User::new(id, Email::from_db(email), password_hash.clone()),
            is_admin: false,
        });
        inner.by_email.insert(email.to_string(), index);

        Ok(id)
    }
}

impl UserProvider for InMemoryCredentialStore {
    async fn user(&self, email: &str) -> StoreResult<User> {
        self.check_available()?;

        let inner = self.lock();
        inner
            .by_email
            .get(email)
            .map(|&index| inner.users[index].user.clone())
            .ok_or(StoreError::UserNotFound)
    }

    async fn is_admin(&self, user_id: UserId) -> StoreResult<bool> {
        self.check_available()?;

        let mut inner = self.lock();
        Self::slot(&mut inner, user_id)
            .map(|stored| stored.is_admin)
            .ok_or(StoreError::UserNotFound)
    }
}

impl AppProvider for InMemoryCredentialStore {
    async fn app(&self, app_id: AppId) -> StoreResult<App> {
        self.check_available()?;

        self.lock()
            .apps
            .get(&app_id)
            .cloned()
            .ok_or(StoreError::AppNotFound)
    }
}
