// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Unit conversions, activity classification, defaults and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants grouped by domain.

/// Unit conversion and normalization constants
pub mod units {
    /// Meters per kilometer
    pub const METERS_PER_KILOMETER: f64 = 1000.0;
    /// Seconds per minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    /// Minutes of elapsed time counted as one kilometer for time-measured activities.
    /// One hour of Yoga is worth 10 km on the leaderboard.
    pub const MINUTES_PER_KM_EQUIVALENT: f64 = 6.0;
}

/// Activity type tags as reported by Strava
pub mod activity_types {
    /// Generic workout, measured by elapsed time
    pub const WORKOUT: &str = "Workout";
    /// Yoga session, measured by elapsed time
    pub const YOGA: &str = "Yoga";
    /// Activity types whose contribution is their elapsed time rather than distance
    pub const TIME_MEASURED: &[&str] = &[WORKOUT, YOGA];
}

/// Provider identifiers
pub mod providers {
    /// Strava provider name
    pub const STRAVA: &str = "strava";
    /// Default Strava REST API base URL
    pub const STRAVA_API_BASE_URL: &str = "https://www.strava.com/api/v3";
    /// Strava's maximum page size for activity listings
    pub const STRAVA_MAX_PAGE_SIZE: usize = 200;
}

/// Date formats used in paths and stored documents
pub mod formats {
    /// Calendar date as used by the sync endpoint and summary `update_date`
    pub const DATE: &str = "%Y-%m-%d";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Timeout configurations
pub mod timeouts {
    /// Upstream API request timeout in seconds
    pub const API_CLIENT_TIMEOUT_SECS: u64 = 60;
    /// Upstream API connect timeout in seconds
    pub const API_CLIENT_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Whole-request timeout applied by the HTTP server in seconds
    pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 300;
}

/// Service identifiers used in logs and health responses
pub mod service_names {
    /// Server name
    pub const STRAVAMAN_SERVER: &str = "stravaman-server";
}

/// Environment variable names read at start-up
pub mod env_config {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// HTTP listen address
    pub const HOST: &str = "HOST";
    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Strava REST API base URL override
    pub const STRAVA_API_BASE_URL: &str = "STRAVA_API_BASE_URL";
    /// Shared bearer secret protecting the team data endpoints
    pub const API_SECRET: &str = "STRAVAMAN_API_SECRET";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Application log level
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
}

/// Fallback values for unset configuration
pub mod defaults {
    /// Listen address
    pub const HOST: &str = "0.0.0.0";
    /// SQLite database file
    pub const DATABASE_URL: &str = "sqlite:./data/stravaman.db";
}
