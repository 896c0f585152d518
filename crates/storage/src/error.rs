//! Typed error enum for the storage layer.
//!
//! Callers match on specific failure modes (not found, constraint, aborted
//! merge, database errors) instead of downcasting opaque boxes.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Foreign key violation (SQLSTATE 23503).
    #[error("foreign key violation: {0}")]
    ForeignKey(String),

    /// SQL / connection / timeout failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Statement rejected by a non-SQL backend.
    #[error("backend error: {0}")]
    Backend(String),

    /// Row data could not be deserialized into domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A group merge failed and its transaction was rolled back.
    #[error("merge aborted at {table}: {source}")]
    MergeAborted {
        table: &'static str,
        #[source]
        source: Box<StorageError>,
    },

    /// Caller supplied something the store cannot act on.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StorageError {
    /// Table a merge stopped at, if this is an aborted merge.
    pub fn aborted_table(&self) -> Option<&'static str> {
        match self {
            Self::MergeAborted { table, .. } => Some(table),
            _ => None,
        }
    }
}

/// Custom `From<sqlx::Error>`, not a blanket `#[from]`.
///
/// - `RowNotFound` → `NotFound` (generic; callers should remap with entity context)
/// - SQLSTATE 23503 → `ForeignKey`
/// - Everything else → `Database`
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound { entity: "row", id: "unknown".into() },
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "23503") => {
                Self::ForeignKey(db_err.message().to_owned())
            },
            _ => Self::Database(err),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption {
            context: "JSON serialization/deserialization".to_owned(),
            source: Box::new(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = StorageError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[test]
    fn aborted_merge_exposes_table() {
        let err = StorageError::MergeAborted {
            table: "reviews",
            source: Box::new(StorageError::Database(sqlx::Error::PoolTimedOut)),
        };
        assert_eq!(err.aborted_table(), Some("reviews"));
        assert!(err.to_string().starts_with("merge aborted at reviews"));
    }

    #[test]
    fn backend_errors_have_no_aborted_table() {
        assert_eq!(StorageError::Backend("nope".to_owned()).aborted_table(), None);
    }
}
