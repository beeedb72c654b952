// ABOUTME: Strava batch sync route
// ABOUTME: GET /strava_data/:date/:batch pulls activities for up to `batch` stale athletes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::resources::ServerResources;
use crate::services::sync::{sync_batch, SyncReport, SyncRequest};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use std::sync::Arc;
use stravaman_core::errors::AppError;

/// Sync routes handler
pub struct SyncRoutes;

impl SyncRoutes {
    /// Create the sync route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/strava_data/:date/:batch", get(Self::handle_sync))
            .with_state(resources)
    }

    async fn handle_sync(
        State(resources): State<Arc<ServerResources>>,
        Path((date, batch)): Path<(String, String)>,
    ) -> Result<Json<SyncReport>, AppError> {
        let request = SyncRequest::parse(&date, &batch)?;
        let report = sync_batch(
            &resources.database,
            resources.activity_source.as_ref(),
            request,
            Utc::now().date_naive(),
        )
        .await?;
        Ok(Json(report))
    }
}
