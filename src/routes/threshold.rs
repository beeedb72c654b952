// ABOUTME: Threshold query route
// ABOUTME: GET /threshold/:route/:place/:distance answers with the crossing record or {}
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::resources::ServerResources;
use crate::services::threshold::resolve_threshold;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use stravaman_core::errors::AppError;

/// Threshold routes handler
pub struct ThresholdRoutes;

impl ThresholdRoutes {
    /// Create the threshold query route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/threshold/:route/:place/:distance",
                get(Self::handle_threshold),
            )
            .with_state(resources)
    }

    /// Answer with the crossing record, or an empty object when the
    /// accumulated distance never reaches the threshold
    async fn handle_threshold(
        State(resources): State<Arc<ServerResources>>,
        Path((route, place, distance)): Path<(String, String, String)>,
    ) -> Result<Response, AppError> {
        let result = resolve_threshold(&resources.database, &route, &place, &distance).await?;

        Ok(match result {
            Some(result) => Json(result).into_response(),
            None => Json(serde_json::json!({})).into_response(),
        })
    }
}
