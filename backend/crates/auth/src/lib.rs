//! Auth (Single Sign-On) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, store and token contracts
//! - `application/` - The auth service (Login, Register, IsAdmin)
//! - `infra/` - PostgreSQL and in-memory stores, JWT issuer
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration with email + password
//! - Login returning a bearer token scoped to one tenant app
//! - Admin flag lookup
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, salted per user, optionally peppered
//! - Unknown email and wrong password are indistinguishable, in result and timing
//! - Tokens signed with the target app's own secret (HS256)
//! - Backend failures never reach callers; they are logged and reported as internal

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::{AuthConfig, AuthService, ConfigError};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryCredentialStore, JwtTokenIssuer, PgCredentialStore};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
