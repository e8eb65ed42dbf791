//! Recipe service backend.
//!
//! A token-authenticated REST API for per-user recipes, tags, and
//! ingredients, arranged hexagonally:
//!
//! - [`domain`]: entities, ports, and the account service; no framework or
//!   storage types.
//! - [`inbound`]: the Actix Web HTTP adapter translating requests into port
//!   calls.
//! - [`outbound`]: Diesel-backed PostgreSQL adapters, in-memory adapters,
//!   and Argon2id password hashing.
//! - [`middleware`]: request tracing.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
