//! Application Layer
//!
//! The auth service and its configuration.

pub mod config;
pub mod is_admin;
pub mod login;
pub mod register;
pub mod service;

// Re-exports
pub use config::{AuthConfig, ConfigError};
pub use service::AuthService;
