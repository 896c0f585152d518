//! Storage backend trait abstraction
//!
//! Async domain traits implemented by the PostgreSQL and in-memory backends.

pub mod location;

pub use location::{LocationCursor, LocationStore};
