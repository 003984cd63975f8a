//! App Entity
//!
//! A tenant application that consumes tokens. Managed outside this crate;
//! the service only reads it by id.

use crate::domain::value_object::{app_id::AppId, app_secret::AppSecret};

/// Tenant application
#[derive(Debug, Clone)]
pub struct App {
    pub id: AppId,
    pub name: String,
    /// HMAC key tokens for this app are signed with
    pub secret: AppSecret,
}

impl App {
    pub fn new(id: AppId, name: impl Into<String>, secret: AppSecret) -> Self {
        Self {
            id,
            name: name.into(),
            secret,
        }
    }
}
