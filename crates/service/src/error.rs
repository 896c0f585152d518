//! Typed error enum for the service layer.

use spott_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying storage and runtime failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (fetch, connection, migration).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Another resolver run holds the run lock.
    #[error("a duplicate cleanup run is already in progress")]
    AlreadyRunning,

    /// Runtime failure outside storage (blocking task panicked, etc.).
    #[error("system: {0}")]
    System(#[source] anyhow::Error),
}

impl ServiceError {
    /// Whether this error means the request collided with a running sweep.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyRunning)
    }
}
