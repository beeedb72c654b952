// ABOUTME: Route module organization for the Stravaman HTTP endpoints
// ABOUTME: One routes struct per domain, merged into the application router by the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Each domain module holds route definitions and thin handlers that
//! delegate to [`crate::services`].

/// Shared-secret bearer authentication
pub mod auth;
/// Health check and readiness routes
pub mod health;
/// Strava batch sync route
pub mod sync;
/// Team registration, activity data and leaderboard routes
pub mod teams;
/// Threshold query route
pub mod threshold;

pub use health::HealthRoutes;
pub use sync::SyncRoutes;
pub use teams::TeamRoutes;
pub use threshold::ThresholdRoutes;
