//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: in-memory repositories for tests and dev mode.
//! - **security**: Argon2id password hashing.

pub mod memory;
pub mod persistence;
pub mod security;
