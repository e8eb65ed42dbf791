//! Actix middleware kept at the edge of the HTTP adapter.

pub mod trace;

pub use trace::Trace;
