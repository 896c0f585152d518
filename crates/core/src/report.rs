//! Run summary returned to the operator.

use serde::Serialize;
use uuid::Uuid;

use crate::{DuplicateGroup, GroupOutcome, POSTS_TABLE, REVIEWS_TABLE};

/// A table (or whole group) that did not merge cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupFailure {
    pub kept_id: Uuid,
    pub redundant_ids: Vec<Uuid>,
    pub table: String,
    pub error: String,
    /// `true` when the whole group was rolled back.
    pub rolled_back: bool,
}

/// Totals for one resolver run.
///
/// `merged` counts location rows actually deleted, so it can be lower than
/// the number of redundant ids detected when groups fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupReport {
    pub groups: usize,
    pub merged: u64,
    pub posts_migrated: u64,
    pub reviews_migrated: u64,
    pub failures: Vec<GroupFailure>,
}

impl DedupReport {
    #[must_use]
    pub fn new(groups: usize) -> Self {
        Self { groups, ..Self::default() }
    }

    /// Fold a committed group into the totals.
    pub fn record_outcome(&mut self, group: &DuplicateGroup, outcome: &GroupOutcome) {
        self.merged = self.merged.saturating_add(outcome.locations_deleted);
        self.posts_migrated = self.posts_migrated.saturating_add(outcome.repointed_rows(POSTS_TABLE));
        self.reviews_migrated =
            self.reviews_migrated.saturating_add(outcome.repointed_rows(REVIEWS_TABLE));
        for failure in &outcome.failures {
            self.failures.push(GroupFailure {
                kept_id: group.kept_id,
                redundant_ids: group.redundant_ids.clone(),
                table: failure.table.to_owned(),
                error: failure.error.clone(),
                rolled_back: false,
            });
        }
    }

    /// Record a group whose transaction was rolled back.
    pub fn record_rollback(&mut self, group: &DuplicateGroup, table: &str, error: String) {
        self.failures.push(GroupFailure {
            kept_id: group.kept_id,
            redundant_ids: group.redundant_ids.clone(),
            table: table.to_owned(),
            error,
            rolled_back: true,
        });
    }

    #[must_use]
    pub fn message(&self) -> String {
        if self.groups == 0 {
            return "No duplicate locations found".to_owned();
        }
        let mut msg = format!(
            "Merged {} duplicate locations across {} groups",
            self.merged, self.groups
        );
        if !self.failures.is_empty() {
            msg.push_str(&format!(" ({} failures)", self.failures.len()));
        }
        msg
    }
}
