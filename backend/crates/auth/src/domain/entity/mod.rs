//! Entities

pub mod app;
pub mod claims;
pub mod user;

pub use app::App;
pub use claims::TokenClaims;
pub use user::User;
