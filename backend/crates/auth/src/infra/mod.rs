//! Infrastructure Layer
//!
//! Credential store backends and the token issuer.

pub mod jwt;
pub mod memory;
pub mod postgres;

pub use jwt::JwtTokenIssuer;
pub use memory::InMemoryCredentialStore;
pub use postgres::PgCredentialStore;
