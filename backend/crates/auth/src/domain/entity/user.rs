//! User Entity
//!
//! Identity record as the credential store returns it. The admin flag is
//! deliberately absent: the store owns it and answers through
//! `UserProvider::is_admin`.

use crate::domain::value_object::{email::Email, user_id::UserId, user_password::UserPassword};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned numeric identifier
    pub id: UserId,
    /// Unique login email (case-sensitive)
    pub email: Email,
    /// Salted Argon2id hash; never logged or returned to callers
    pub password_hash: UserPassword,
}

impl User {
    pub fn new(id: UserId, email: Email, password_hash: UserPassword) -> Self {
        Self {
            id,
            email,
            password_hash,
        }
    }
}
