// ABOUTME: Team registration and secret-protected team data routes
// ABOUTME: POST /register-team, GET /activity-data and GET /leaderboard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Team routes
//!
//! Registration is open. The data endpoints require the shared API secret
//! as a bearer token.

use super::auth::require_api_secret;
use crate::resources::ServerResources;
use crate::services::teams::{register_team, team_activity_data, team_leaderboard, TeamActivityData};
use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use stravaman_core::errors::AppError;
use stravaman_core::models::AthleteProfile;
use stravaman_intelligence::Leaderboard;

/// Registration form fields
#[derive(Debug, Default, Deserialize)]
pub struct RegisterTeamForm {
    /// Team name
    #[serde(default)]
    pub team: String,
    /// Strava athlete id
    #[serde(default)]
    pub athleteid: String,
}

/// Team routes handler
pub struct TeamRoutes;

impl TeamRoutes {
    /// Create all team routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/register-team", post(Self::handle_register_team))
            .route("/activity-data", get(Self::handle_activity_data))
            .route("/leaderboard", get(Self::handle_leaderboard))
            .with_state(resources)
    }

    async fn handle_register_team(
        State(resources): State<Arc<ServerResources>>,
        Form(form): Form<RegisterTeamForm>,
    ) -> Result<Json<AthleteProfile>, AppError> {
        let profile = register_team(&resources.database, &form.athleteid, &form.team).await?;
        Ok(Json(profile))
    }

    async fn handle_activity_data(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<TeamActivityData>, AppError> {
        require_api_secret(&headers, resources.config.api_secret.as_deref())?;
        Ok(Json(team_activity_data(&resources.database).await?))
    }

    async fn handle_leaderboard(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<Leaderboard>, AppError> {
        require_api_secret(&headers, resources.config.api_secret.as_deref())?;
        Ok(Json(team_leaderboard(&resources.database).await?))
    }
}
