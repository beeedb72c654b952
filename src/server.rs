// ABOUTME: HTTP server assembly for the Stravaman API
// ABOUTME: Merges domain routers, applies trace, CORS and timeout layers, and serves with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, SyncRoutes, TeamRoutes, ThresholdRoutes};
use anyhow::{Context, Result};
use axum::Router;
use http::{header, Method};
use std::sync::Arc;
use std::time::Duration;
use stravaman_core::constants::timeouts::HTTP_REQUEST_TIMEOUT_SECS;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// CORS policy: any origin may read, only the headers the API uses are allowed
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}

/// Build the application router over shared resources
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(ThresholdRoutes::routes(Arc::clone(&resources)))
        .merge(SyncRoutes::routes(Arc::clone(&resources)))
        .merge(TeamRoutes::routes(resources))
        .layer(TimeoutLayer::new(Duration::from_secs(
            HTTP_REQUEST_TIMEOUT_SECS,
        )))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn serve(resources: Arc<ServerResources>) -> Result<()> {
    let address = format!("{}:{}", resources.config.host, resources.config.http_port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!("HTTP server listening on http://{address}");

    axum::serve(listener, router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
