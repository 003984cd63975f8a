//! Token Claims
//!
//! Payload of an issued bearer token. Never persisted; built fresh for
//! every successful login. Timestamps are Unix seconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::entity::{app::App, user::User};

/// Token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject user id
    pub uid: i64,
    pub email: String,
    /// Tenant the token is scoped to
    pub app_id: i64,
    /// Issued at
    pub iat: i64,
    /// Expires at (`iat` + ttl)
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(user: &User, app: &App, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

        Self {
            uid: user.id.value(),
            email: user.email.as_str().to_string(),
            app_id: app.id.value(),
            iat,
            exp: iat.saturating_add(ttl_secs),
        }
    }

    /// Lifetime in seconds
    pub fn ttl_secs(&self) -> i64 {
        self.exp - self.iat
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}
