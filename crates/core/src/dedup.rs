//! Proximity-based duplicate detection over location rows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Location;

/// One canonical location plus the rows that will be merged into it.
///
/// Computed fresh on every run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    pub kept_id: Uuid,
    pub redundant_ids: Vec<Uuid>,
}

impl DuplicateGroup {
    #[must_use]
    pub fn new(kept_id: Uuid, redundant_ids: Vec<Uuid>) -> Self {
        Self { kept_id, redundant_ids }
    }
}

/// Groups locations that sit inside a `threshold_deg` bounding box of an
/// earlier-created anchor.
///
/// Locations are ordered by `created_at` (ties by id) before scanning, so the
/// earliest row of a cluster is always kept and input order never matters.
/// Each row is claimed at most once, either as an anchor or as a redundant
/// match. Matches are tested against the anchor only, there is no chaining
/// through intermediate rows.
///
/// O(N²); callers with large inputs should run this off the async executor.
#[must_use]
pub fn detect_duplicate_groups(locations: &[Location], threshold_deg: f64) -> Vec<DuplicateGroup> {
    let mut ordered: Vec<&Location> = locations.iter().collect();
    ordered.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

    let mut processed = vec![false; ordered.len()];
    let mut groups = Vec::new();

    for (i, anchor) in ordered.iter().enumerate() {
        if processed[i] {
            continue;
        }
        processed[i] = true;

        let mut redundant_ids = Vec::new();
        let start = i.saturating_add(1);
        for (j, candidate) in ordered.iter().enumerate().skip(start) {
            if processed[j] || !anchor.is_near(candidate, threshold_deg) {
                continue;
            }
            processed[j] = true;
            redundant_ids.push(candidate.id);
        }

        if !redundant_ids.is_empty() {
            groups.push(DuplicateGroup::new(anchor.id, redundant_ids));
        }
    }

    groups
}

#[cfg(test)]
#[path = "dedup_tests.rs"]
mod tests;
