//! HTTP API for the Spott duplicate location resolver.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod handlers;
mod response_types;

use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use spott_service::DedupService;

pub use response_types::{CleanupResponse, ErrorResponse, PreviewResponse, VersionResponse};

/// Path of the cleanup endpoint.
pub const CLEANUP_PATH: &str = "/cleanup-duplicate-locations";
/// Same endpoint under the edge-function prefix existing clients call.
pub const CLEANUP_FUNCTION_PATH: &str = "/functions/v1/cleanup-duplicate-locations";

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Resolver run and preview
    pub dedup_service: Arc<DedupService>,
}

impl AppState {
    #[must_use]
    pub fn new(dedup_service: Arc<DedupService>) -> Self {
        Self { dedup_service }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route(CLEANUP_PATH, post(handlers::cleanup::cleanup_duplicate_locations))
        .route(CLEANUP_FUNCTION_PATH, post(handlers::cleanup::cleanup_duplicate_locations))
        .route("/duplicate-locations/preview", get(handlers::cleanup::preview_duplicate_locations))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any origin, method and header. Preflight requests are answered here.
fn cors_layer() -> CorsLayer {
    CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
