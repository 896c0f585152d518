use std::path::PathBuf;

use anyhow::Result;
use spott_core::DedupConfig;

use crate::load_service;

/// Print duplicate groups as JSON. With `input`, locations come from a file
/// and no database is contacted.
pub(crate) async fn run(input: Option<PathBuf>) -> Result<()> {
    let service = load_service(input, DedupConfig::from_env()).await?;

    let groups = service.preview().await?;
    tracing::info!(groups = groups.len(), "detection finished");
    println!("{}", serde_json::to_string_pretty(&groups)?);
    Ok(())
}
