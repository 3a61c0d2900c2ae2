//! Test Support Crate
//!
//! Shared test infrastructure for the engine: in-memory implementations of
//! every port, a recording notifier with failure injection, a stub document
//! renderer, and builders with sensible defaults for the domain entities.

pub mod adapters;
pub mod builders;

pub use adapters::*;
pub use builders::*;
