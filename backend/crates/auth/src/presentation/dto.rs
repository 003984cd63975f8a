//! API DTOs (Data Transfer Objects)
//!
//! Request validation lives here: the service trusts its inputs to be
//! present and well-formed, and only reports its own closed error set.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::MAX_PASSWORD_LENGTH;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{
    app_id::{AppId, EMPTY_APP_ID},
    email::Email,
};

fn validate_password(password: &str) -> AppResult<()> {
    if password.is_empty() {
        return Err(AppError::bad_request("Password is required")
            .with_action("Please enter a password"));
    }

    if password.chars().count() > MAX_PASSWORD_LENGTH {
        return Err(AppError::bad_request(format!(
            "Password must be at most {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }

    Ok(())
}

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> AppResult<()> {
        Email::parse(self.email.as_str())?;
        validate_password(&self.password)
    }
}

/// Register response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: i64,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub app_id: i64,
}

impl LoginRequest {
    pub fn validate(&self) -> AppResult<()> {
        Email::parse(self.email.as_str())?;
        validate_password(&self.password)?;

        if self.app_id() == EMPTY_APP_ID {
            return Err(AppError::bad_request("App id is required"));
        }

        Ok(())
    }

    pub fn app_id(&self) -> AppId {
        AppId::new(self.app_id)
    }
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

// ============================================================================
// Is Admin
// ============================================================================

/// Admin lookup response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsAdminResponse {
    pub is_admin: bool,
}
