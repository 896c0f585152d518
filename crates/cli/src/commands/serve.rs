use std::sync::Arc;

use anyhow::Result;
use spott_core::DedupConfig;
use spott_http::{AppState, create_router};

use crate::connect_service;

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let service = Arc::new(connect_service(DedupConfig::from_env()).await?);
    let router = create_router(Arc::new(AppState::new(service)));

    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("HTTP server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
