mod merge;

use std::sync::Arc;
use std::time::Instant;

use spott_core::{DedupConfig, DuplicateGroup, Location, detect_duplicate_groups};
use spott_storage::{LocationCursor, LocationStore, StorageBackend};
use tokio::sync::Mutex;

use crate::ServiceError;

pub struct DedupService {
    pub(crate) storage: Arc<StorageBackend>,
    pub(crate) config: DedupConfig,
    /// Held for the whole of a mutating run.
    pub(crate) run_lock: Mutex<()>,
}

impl DedupService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>, config: DedupConfig) -> Self {
        tracing::debug!(
            backend = storage.kind(),
            threshold_deg = config.threshold_deg,
            page_size = config.page_size,
            mode = %config.mode,
            "DedupService configured"
        );
        Self { storage, config, run_lock: Mutex::new(()) }
    }

    /// Detect duplicate groups without touching any rows.
    pub async fn preview(&self) -> Result<Vec<DuplicateGroup>, ServiceError> {
        let locations = self.load_all_locations().await?;
        self.detect(locations).await
    }

    /// Every location, in `(created_at, id)` order, fetched page by page.
    ///
    /// Any page failure aborts; a partial listing would produce wrong groups.
    pub(crate) async fn load_all_locations(&self) -> Result<Vec<Location>, ServiceError> {
        let page_size = self.config.page_size.max(1);
        let mut all = Vec::new();
        let mut cursor = None;
        loop {
            let page = self.storage.list_locations_page(cursor, page_size).await?;
            let fetched = page.len();
            cursor = page.last().map(LocationCursor::from);
            all.extend(page);
            if fetched < page_size {
                break;
            }
        }
        tracing::debug!(count = all.len(), "loaded locations");
        Ok(all)
    }

    /// O(N²) comparison runs in a blocking thread to avoid starving the executor.
    pub(crate) async fn detect(
        &self,
        locations: Vec<Location>,
    ) -> Result<Vec<DuplicateGroup>, ServiceError> {
        let threshold = self.config.threshold_deg;
        let count = locations.len();
        let start_time = Instant::now();

        let groups =
            tokio::task::spawn_blocking(move || detect_duplicate_groups(&locations, threshold))
                .await
                .map_err(|e| ServiceError::System(anyhow::anyhow!("spawn_blocking failed: {e}")))?;

        tracing::debug!(
            items = count,
            elapsed_ms = start_time.elapsed().as_millis(),
            groups = groups.len(),
            "duplicate detection completed"
        );
        Ok(groups)
    }
}
