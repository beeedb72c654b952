// ABOUTME: Distance normalization putting distance- and time-measured activities on one axis
// ABOUTME: Converts meters to km and elapsed time to km-equivalents, flagging degraded records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Activity normalization
//!
//! A record with a tracked distance contributes `distance / 1000` km. A record
//! whose distance is zero (Workout, Yoga, or anything without GPS) contributes
//! its elapsed time at six minutes per kilometer, so one hour counts as 10 km.
//! Cached threshold answers depend on these exact constants.

use stravaman_core::constants::units::{
    METERS_PER_KILOMETER, MINUTES_PER_KM_EQUIVALENT, SECONDS_PER_MINUTE,
};
use stravaman_core::models::ActivityRecord;
use tracing::warn;

/// Normalized contribution of one record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustedDistance {
    /// Contribution in km or km-equivalents
    pub kilometers: f64,
    /// A measurement was missing or unusable and was read as zero
    pub degraded: bool,
}

/// Normalize a distance/elapsed-time pair to kilometers
#[must_use]
#[allow(clippy::float_cmp)] // exact zero marks an untracked distance
pub fn adjust_measurements(distance_meters: f64, elapsed_seconds: f64) -> f64 {
    if distance_meters == 0.0 {
        elapsed_seconds / SECONDS_PER_MINUTE / MINUTES_PER_KM_EQUIVALENT
    } else {
        distance_meters / METERS_PER_KILOMETER
    }
}

/// Normalize a record, reading missing or invalid measurements as zero
///
/// Degraded records are logged at `warn` so bad store data stays visible
/// without failing the whole aggregation.
#[must_use]
pub fn adjust(record: &ActivityRecord) -> AdjustedDistance {
    let (distance, distance_ok) = sanitize(record.distance);
    let (elapsed_time, elapsed_ok) = sanitize(record.elapsed_time);
    let degraded = !(distance_ok && elapsed_ok);

    if degraded {
        warn!(
            athlete_id = %record.athlete_id,
            activity_type = %record.activity_type,
            timestamp = %record.timestamp,
            distance = ?record.distance,
            elapsed_time = ?record.elapsed_time,
            "Degraded activity record, missing measurements counted as zero"
        );
    }

    AdjustedDistance {
        kilometers: adjust_measurements(distance, elapsed_time),
        degraded,
    }
}

fn sanitize(value: Option<f64>) -> (f64, bool) {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => (v, true),
        _ => (0.0, false),
    }
}
