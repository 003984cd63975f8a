//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with a configurable work factor)
//! - Zeroized handling of clear-text secrets

pub mod password;
