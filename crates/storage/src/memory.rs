//! In-process location store.
//!
//! Mirrors the Postgres schema closely enough to exercise merges without a
//! database: dependent rows must point at an existing location, and deleting a
//! location that is still referenced fails like a foreign key would. Backs the
//! offline `detect --input` path and the service/HTTP tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use spott_core::{
    DISCARDED_TABLES, DependentTable, DuplicateGroup, GroupOutcome, LOCATIONS_TABLE, Location,
    MergeMode, REPOINTED_TABLES, TableCount, TableFailure, all_dependent_tables,
};
use uuid::Uuid;

use crate::error::StorageError;
use crate::traits::{LocationCursor, LocationStore};

/// A row in a dependent table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependentRow {
    pub id: Uuid,
    pub location_id: Uuid,
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    locations: BTreeMap<Uuid, Location>,
    rows: HashMap<&'static str, Vec<DependentRow>>,
    failing_tables: HashSet<&'static str>,
}

impl MemoryState {
    fn check_writable(&self, table: &'static str) -> Result<(), StorageError> {
        if self.failing_tables.contains(table) {
            return Err(StorageError::Backend(format!("writes to {table} are failing")));
        }
        Ok(())
    }

    fn repoint(
        &mut self,
        dep: &DependentTable,
        kept: Uuid,
        ids: &[Uuid],
    ) -> Result<u64, StorageError> {
        self.check_writable(dep.table)?;
        let mut rows = 0_u64;
        for row in self.rows.entry(dep.table).or_default() {
            if ids.contains(&row.location_id) {
                row.location_id = kept;
                rows = rows.saturating_add(1);
            }
        }
        Ok(rows)
    }

    fn discard(&mut self, dep: &DependentTable, ids: &[Uuid]) -> Result<u64, StorageError> {
        self.check_writable(dep.table)?;
        let table = self.rows.entry(dep.table).or_default();
        let before = table.len();
        table.retain(|row| !ids.contains(&row.location_id));
        Ok(u64::try_from(before.saturating_sub(table.len())).unwrap_or(u64::MAX))
    }

    fn delete_locations(&mut self, ids: &[Uuid]) -> Result<u64, StorageError> {
        self.check_writable(LOCATIONS_TABLE)?;
        for (table, rows) in &self.rows {
            if let Some(row) = rows.iter().find(|r| ids.contains(&r.location_id)) {
                return Err(StorageError::ForeignKey(format!(
                    "location {} is still referenced from table \"{table}\"",
                    row.location_id
                )));
            }
        }
        let mut deleted = 0_u64;
        for id in ids {
            if self.locations.remove(id).is_some() {
                deleted = deleted.saturating_add(1);
            }
        }
        Ok(deleted)
    }
}

/// Shared-state store; clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_locations(locations: impl IntoIterator<Item = Location>) -> Self {
        let store = Self::new();
        for loc in locations {
            store.insert_location(loc);
        }
        store
    }

    /// Load a JSON array of locations.
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let locations: Vec<Location> = serde_json::from_str(json)?;
        Ok(Self::with_locations(locations))
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert_location(&self, location: Location) {
        self.lock().locations.insert(location.id, location);
    }

    /// Insert a row referencing `location_id` into a catalogued dependent table.
    pub fn insert_dependent(&self, table: &str, location_id: Uuid) -> Result<Uuid, StorageError> {
        let dep = lookup_table(table)?;
        let mut state = self.lock();
        if !state.locations.contains_key(&location_id) {
            return Err(StorageError::ForeignKey(format!(
                "{table}.{} references missing location {location_id}",
                dep.column
            )));
        }
        let id = Uuid::new_v4();
        state.rows.entry(dep.table).or_default().push(DependentRow { id, location_id });
        Ok(id)
    }

    /// Rows currently stored in `table`, in insertion order.
    #[must_use]
    pub fn dependents(&self, table: &str) -> Vec<DependentRow> {
        self.lock().rows.get(table).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn location(&self, id: Uuid) -> Option<Location> {
        self.lock().locations.get(&id).cloned()
    }

    #[must_use]
    pub fn location_count(&self) -> usize {
        self.lock().locations.len()
    }

    /// Make every later write to `table` fail. Accepts dependent tables and
    /// `locations`.
    pub fn fail_writes_to(&self, table: &str) -> Result<(), StorageError> {
        let name =
            if table == LOCATIONS_TABLE { LOCATIONS_TABLE } else { lookup_table(table)?.table };
        self.lock().failing_tables.insert(name);
        Ok(())
    }
}

fn lookup_table(table: &str) -> Result<&'static DependentTable, StorageError> {
    all_dependent_tables()
        .find(|dep| dep.table == table)
        .ok_or_else(|| StorageError::InvalidInput(format!("unknown dependent table: {table}")))
}

/// Apply one step to the working copy, following the same atomic/best-effort
/// contract as the Postgres backend.
fn apply_step(
    mode: MergeMode,
    table: &'static str,
    result: Result<u64, StorageError>,
) -> Result<Result<u64, TableFailure>, StorageError> {
    match (result, mode) {
        (Ok(rows), _) => Ok(Ok(rows)),
        (Err(e), MergeMode::Atomic) => {
            Err(StorageError::MergeAborted { table, source: Box::new(e) })
        },
        (Err(e), MergeMode::BestEffort) => {
            tracing::warn!(table, error = %e, "statement rolled back to savepoint");
            Ok(Err(TableFailure { table, error: e.to_string() }))
        },
    }
}

#[async_trait]
impl LocationStore for MemoryStorage {
    async fn list_locations_page(
        &self,
        after: Option<LocationCursor>,
        limit: usize,
    ) -> Result<Vec<Location>, StorageError> {
        let state = self.lock();
        let mut all: Vec<&Location> = state.locations.values().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all
            .into_iter()
            .filter(|loc| after.is_none_or(|c| (loc.created_at, loc.id) > (c.created_at, c.id)))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn merge_group(
        &self,
        group: &DuplicateGroup,
        mode: MergeMode,
    ) -> Result<GroupOutcome, StorageError> {
        let mut state = self.lock();
        if !state.locations.contains_key(&group.kept_id) {
            return Err(StorageError::NotFound { entity: "location", id: group.kept_id.to_string() });
        }

        // Work on a copy; it replaces the live state only on commit.
        let mut working = state.clone();
        let ids = group.redundant_ids.as_slice();
        let mut outcome = GroupOutcome::default();

        for dep in REPOINTED_TABLES {
            match apply_step(mode, dep.table, working.repoint(dep, group.kept_id, ids))? {
                Ok(rows) => outcome.repointed.push(TableCount { table: dep.table, rows }),
                Err(failure) => outcome.failures.push(failure),
            }
        }

        for dep in DISCARDED_TABLES {
            match apply_step(mode, dep.table, working.discard(dep, ids))? {
                Ok(rows) => outcome.discarded.push(TableCount { table: dep.table, rows }),
                Err(failure) => outcome.failures.push(failure),
            }
        }

        match apply_step(mode, LOCATIONS_TABLE, working.delete_locations(ids))? {
            Ok(rows) => outcome.locations_deleted = rows,
            Err(failure) => outcome.failures.push(failure),
        }

        *state = working;
        Ok(outcome)
    }
}
