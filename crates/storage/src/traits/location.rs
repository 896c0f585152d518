use async_trait::async_trait;
use chrono::{DateTime, Utc};
use spott_core::{DuplicateGroup, GroupOutcome, Location, MergeMode};
use uuid::Uuid;

use crate::error::StorageError;

/// Keyset position after the last row of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationCursor {
    pub created_at: DateTime<Utc>,
    pub id: Uuid,
}

impl From<&Location> for LocationCursor {
    fn from(loc: &Location) -> Self {
        Self { created_at: loc.created_at, id: loc.id }
    }
}

/// Location listing and duplicate-group merging.
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// One page of locations ordered by `(created_at, id)`, strictly after `after`.
    async fn list_locations_page(
        &self,
        after: Option<LocationCursor>,
        limit: usize,
    ) -> Result<Vec<Location>, StorageError>;

    /// Repoint content rows, discard preference rows and delete the redundant
    /// locations of `group`, all inside one transaction.
    ///
    /// In [`MergeMode::Atomic`] the first failing statement rolls the group back
    /// and yields [`StorageError::MergeAborted`]. In [`MergeMode::BestEffort`]
    /// failing statements are listed in [`GroupOutcome::failures`].
    async fn merge_group(
        &self,
        group: &DuplicateGroup,
        mode: MergeMode,
    ) -> Result<GroupOutcome, StorageError>;
}
