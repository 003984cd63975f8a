//! Domain Layer
//!
//! Contains entities, value objects, and the store and token contracts.

pub mod entity;
pub mod repository;
pub mod token;
pub mod value_object;

// Re-exports
pub use entity::{app::App, claims::TokenClaims, user::User};
pub use repository::{AppProvider, StoreError, StoreResult, UserProvider, UserSaver};
pub use token::{TokenError, TokenIssuer};
