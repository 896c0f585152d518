//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use spott_core::{DuplicateGroup, GroupOutcome, Location, MergeMode};

use crate::error::StorageError;
use crate::memory::MemoryStorage;
use crate::pg_storage::PgStorage;
use crate::traits::{LocationCursor, LocationStore};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Postgres(s) => <PgStorage as $trait>::$method(s, $($arg),*).await,
            StorageBackend::Memory(s) => <MemoryStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(PgStorage),
    Memory(MemoryStorage),
}

impl StorageBackend {
    /// Connect to Postgres, creating the schema first when `migrate` is set.
    pub async fn new_postgres(database_url: &str, migrate: bool) -> Result<Self, StorageError> {
        let pg = PgStorage::new(database_url).await?;
        if migrate {
            pg.migrate().await?;
        }
        Ok(Self::Postgres(pg))
    }

    #[must_use]
    pub fn new_memory(store: MemoryStorage) -> Self {
        Self::Memory(store)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

#[async_trait]
impl LocationStore for StorageBackend {
    async fn list_locations_page(
        &self,
        after: Option<LocationCursor>,
        limit: usize,
    ) -> Result<Vec<Location>, StorageError> {
        dispatch!(self, LocationStore, list_locations_page(after, limit))
    }

    async fn merge_group(
        &self,
        group: &DuplicateGroup,
        mode: MergeMode,
    ) -> Result<GroupOutcome, StorageError> {
        dispatch!(self, LocationStore, merge_group(group, mode))
    }
}
