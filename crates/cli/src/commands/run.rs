use std::path::PathBuf;

use anyhow::Result;
use spott_core::{DedupConfig, MergeMode};

use crate::load_service;

/// One resolver pass. Stdout carries only the report JSON; the summary line
/// goes to the log on stderr.
///
/// With `input`, the merge runs against an in-memory copy of the file and
/// nothing is written back.
pub(crate) async fn run(mode: Option<MergeMode>, input: Option<PathBuf>) -> Result<()> {
    let mut config = DedupConfig::from_env();
    if let Some(mode) = mode {
        config = config.with_mode(mode);
    }
    let service = load_service(input, config).await?;
    let report = service.run().await?;

    if !report.failures.is_empty() {
        tracing::warn!(failures = report.failures.len(), "some groups did not merge cleanly");
    }
    tracing::info!(mode = %config.mode, "{}", report.message());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
