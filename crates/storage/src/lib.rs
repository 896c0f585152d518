//! Storage layer for the Spott duplicate resolver
//!
//! PostgreSQL (sqlx) for production, an in-memory store for offline runs and
//! tests, both behind the [`traits::LocationStore`] trait.

mod backend;
mod error;
mod memory;
mod pg_migrations;
mod pg_storage;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::{DependentRow, MemoryStorage};
pub use pg_storage::PgStorage;
pub use traits::{LocationCursor, LocationStore};
