// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: In-memory activity store, server resources and seeding helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `stravaman_server`

use chrono::{DateTime, TimeZone, Utc};
use std::sync::{Arc, Once};
use stravaman_providers::{ActivitySource, StravaActivity, StravaClient};
use stravaman_server::{
    config::{DatabaseUrl, Environment, ServerConfig},
    database::Database,
    models::{AthleteProfile, AthleteTokens},
    resources::ServerResources,
};

static INIT_LOGGER: Once = Once::new();

/// Secret configured on test servers
pub const TEST_API_SECRET: &str = "test-api-secret";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::new("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database")
}

/// Configuration for test servers
pub fn test_config(api_secret: Option<&str>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_owned(),
        http_port: 0,
        environment: Environment::Testing,
        database_url: DatabaseUrl::Memory,
        api_secret: api_secret.map(str::to_owned),
        ..ServerConfig::default()
    }
}

/// Server resources over a fresh database and the given activity source
pub async fn create_test_server_resources_with(
    source: Arc<dyn ActivitySource>,
    api_secret: Option<&str>,
) -> Arc<ServerResources> {
    let database = create_test_database().await;
    Arc::new(ServerResources::new(
        database,
        source,
        test_config(api_secret),
    ))
}

/// Server resources whose Strava client points at a closed port
pub async fn create_test_server_resources() -> Arc<ServerResources> {
    let unreachable = StravaClient::with_base_url("http://127.0.0.1:9").unwrap();
    create_test_server_resources_with(Arc::new(unreachable), Some(TEST_API_SECRET)).await
}

/// Parse an RFC 3339 timestamp
pub fn at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .unwrap()
        .with_timezone(&Utc)
}

/// Strava activity with both measurements
pub fn strava_activity(
    id: u64,
    activity_type: &str,
    start_date: &str,
    distance: f64,
    elapsed_time: f64,
) -> StravaActivity {
    StravaActivity {
        id,
        name: None,
        activity_type: activity_type.to_owned(),
        start_date: at(start_date),
        distance: Some(distance),
        elapsed_time: Some(elapsed_time),
    }
}

/// Create a profile (and team, when given) for an athlete
pub async fn create_athlete(
    database: &Database,
    athlete_id: &str,
    firstname: &str,
    lastname: &str,
    team: Option<&str>,
) {
    database
        .upsert_athlete_profile(&AthleteProfile {
            athlete_id: athlete_id.to_owned(),
            firstname: Some(firstname.to_owned()),
            lastname: Some(lastname.to_owned()),
            team: team.map(str::to_owned),
        })
        .await
        .unwrap();
}

/// Store Strava tokens for an athlete
pub async fn store_tokens(database: &Database, athlete_id: &str, access_token: &str) {
    database
        .upsert_athlete_tokens(&AthleteTokens {
            athlete_id: athlete_id.to_owned(),
            access_token: access_token.to_owned(),
            refresh_token: format!("refresh-{athlete_id}"),
            expires_at: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
            scope: Some("activity:read_all".to_owned()),
        })
        .await
        .unwrap();
}

/// Three athletes, three teams: the classic 10 / 5 / 100 km scenario
///
/// Athlete `a` runs 5 km on Jan 1, `b` does an hour of yoga on Jan 2 and `c`
/// rides 2 km on Jan 3, for 17 km of adjusted distance in total.
pub async fn seed_scenario(database: &Database) {
    create_athlete(database, "a", "Ann", "Runner", Some("Red")).await;
    create_athlete(database, "b", "Bob", "Stretcher", Some("Blue")).await;
    create_athlete(database, "c", "Cat", "Cyclist", Some("Red")).await;

    database
        .store_activities("a", &[strava_activity(1, "Run", "2023-01-01T08:00:00Z", 5000.0, 1500.0)])
        .await
        .unwrap();
    database
        .store_activities("b", &[strava_activity(2, "Yoga", "2023-01-02T08:00:00Z", 0.0, 3600.0)])
        .await
        .unwrap();
    database
        .store_activities("c", &[strava_activity(3, "Ride", "2023-01-03T08:00:00Z", 2000.0, 400.0)])
        .await
        .unwrap();
}
