use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use spott_service::ServiceError;

use crate::AppState;
use crate::api_error::ApiError;
use crate::response_types::{CleanupResponse, PreviewResponse};

/// Run the resolver once. Takes no body.
///
/// The run is spawned so a disconnecting caller cannot cancel it between
/// groups.
pub async fn cleanup_duplicate_locations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CleanupResponse>, ApiError> {
    let service = Arc::clone(&state.dedup_service);
    let report = tokio::spawn(async move { service.run().await })
        .await
        .map_err(|e| ServiceError::System(anyhow::anyhow!("cleanup task failed: {e}")))??;
    Ok(Json(CleanupResponse::from_report(report)))
}

/// Detected groups, nothing is modified.
pub async fn preview_duplicate_locations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let groups = state.dedup_service.preview().await?;
    let total_redundant = groups.iter().map(|g| g.redundant_ids.len()).sum();
    Ok(Json(PreviewResponse { success: true, total_redundant, groups }))
}
