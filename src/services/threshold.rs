// ABOUTME: Threshold query orchestration around the pure scanner
// ABOUTME: Validates the distance, consults the route/place cache, scans the store and caches crossings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database::Database;
use stravaman_core::errors::AppResult;
use stravaman_core::models::ThresholdResult;
use stravaman_intelligence::{scan, Threshold};
use tracing::{debug, info, warn};

/// Answer "where did the combined distance reach `distance` km" for a route and place
///
/// The distance is validated before anything else is touched. A cached answer
/// for `(route, place)` wins over a fresh scan. Only crossings are cached:
/// a threshold nobody has reached yet may be reached after the next sync.
///
/// # Errors
///
/// Returns `INVALID_THRESHOLD` for a non-numeric, negative or non-finite
/// distance, and a database error if the store cannot be read or written
pub async fn resolve_threshold(
    database: &Database,
    route: &str,
    place: &str,
    distance: &str,
) -> AppResult<Option<ThresholdResult>> {
    let threshold: Threshold = distance.parse()?;

    if let Some(cached) = database.get_threshold_result(route, place).await? {
        debug!(route, place, "Threshold answer served from cache");
        return Ok(Some(cached));
    }

    let records = database.list_activity_records().await?;
    let outcome = scan(&records, threshold);

    if outcome.degraded_records > 0 {
        warn!(
            route,
            place,
            degraded = outcome.degraded_records,
            scanned = outcome.records_scanned,
            "Threshold scan read records with missing or invalid measurements as zero"
        );
    }

    match outcome.crossing {
        Some(result) => {
            info!(
                route,
                place,
                threshold_km = threshold.kilometers(),
                athlete_id = %result.record.athlete_id,
                accumulated_km = result.accumulated_distance,
                "Threshold crossed"
            );
            database
                .store_threshold_result(route, place, threshold.kilometers(), &result)
                .await?;
            Ok(Some(result))
        }
        None => {
            debug!(
                route,
                place,
                threshold_km = threshold.kilometers(),
                total_km = outcome.total_distance,
                "Threshold not reached"
            );
            Ok(None)
        }
    }
}
