use spott_core::{DedupReport, MergeMode};
use spott_storage::LocationStore;

use super::DedupService;
use crate::ServiceError;

impl DedupService {
    /// Run the resolver once with the configured merge mode.
    pub async fn run(&self) -> Result<DedupReport, ServiceError> {
        self.run_with_mode(self.config.mode).await
    }

    /// Fetch, detect, then merge each group in its own transaction.
    ///
    /// Groups are merged strictly one after another. A failed group is
    /// recorded in the report and the run moves on; only a failed fetch or
    /// detection aborts the run.
    pub async fn run_with_mode(&self, mode: MergeMode) -> Result<DedupReport, ServiceError> {
        let Ok(_guard) = self.run_lock.try_lock() else {
            tracing::warn!("duplicate cleanup requested while a run is in progress");
            return Err(ServiceError::AlreadyRunning);
        };

        tracing::info!(%mode, "duplicate location cleanup started");
        let locations = self.load_all_locations().await?;
        let location_count = locations.len();
        let groups = self.detect(locations).await?;

        let mut report = DedupReport::new(groups.len());
        for group in &groups {
            match self.storage.merge_group(group, mode).await {
                Ok(outcome) => {
                    tracing::info!(
                        kept = %group.kept_id,
                        redundant = group.redundant_ids.len(),
                        deleted = outcome.locations_deleted,
                        failed_tables = outcome.failures.len(),
                        "merged duplicate group"
                    );
                    report.record_outcome(group, &outcome);
                },
                Err(e) => {
                    let table = e.aborted_table().unwrap_or("transaction");
                    tracing::warn!(
                        kept = %group.kept_id,
                        table,
                        error = %e,
                        "group merge rolled back, skipping group"
                    );
                    report.record_rollback(group, table, e.to_string());
                },
            }
        }

        tracing::info!(
            locations = location_count,
            groups = report.groups,
            merged = report.merged,
            posts_migrated = report.posts_migrated,
            reviews_migrated = report.reviews_migrated,
            failures = report.failures.len(),
            "duplicate location cleanup finished"
        );
        Ok(report)
    }
}
