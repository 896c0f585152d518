//! Response types (Serialize)

use serde::Serialize;
use spott_core::{DedupReport, DuplicateGroup};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponse {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub report: DedupReport,
}

impl CleanupResponse {
    #[must_use]
    pub fn from_report(report: DedupReport) -> Self {
        Self { success: true, message: report.message(), report }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub success: bool,
    pub total_redundant: usize,
    pub groups: Vec<DuplicateGroup>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
}
