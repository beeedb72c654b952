// ABOUTME: Threshold scanner finding the first activity at which team distance reaches a target
// ABOUTME: Stable chronological sort, running normalized sum, first-crossing search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Threshold scanner
//!
//! Answers "at which activity did the combined effort of every athlete reach
//! `N` km?". Records from all athletes are ordered by the instant of their
//! timestamp (ties keep their input order), normalized with [`adjust`], summed in order, and the
//! first record whose running total reaches the threshold is returned.
//!
//! The scan is pure: it never mutates its input and holds no state between
//! calls, so concurrent queries need no coordination.

use crate::normalization::adjust;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::str::FromStr;
use stravaman_core::errors::AppError;
use stravaman_core::models::{ActivityRecord, ThresholdResult};
use thiserror::Error;
use tracing::warn;

/// Rejected threshold values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    /// The value could not be parsed as a number
    #[error("distance threshold '{0}' is not a number")]
    NotANumber(String),
    /// The value is below zero
    #[error("distance threshold {0} is negative")]
    Negative(f64),
    /// The value is NaN or infinite
    #[error("distance threshold must be a finite number")]
    NotFinite,
}

impl From<ThresholdError> for AppError {
    fn from(error: ThresholdError) -> Self {
        Self::invalid_threshold(error.to_string())
    }
}

/// A validated accumulated-distance target, in kilometers
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// Validate a threshold in kilometers
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative, NaN or infinite
    pub fn new(kilometers: f64) -> Result<Self, ThresholdError> {
        if !kilometers.is_finite() {
            return Err(ThresholdError::NotFinite);
        }
        if kilometers < 0.0 {
            return Err(ThresholdError::Negative(kilometers));
        }
        Ok(Self(kilometers))
    }

    /// Threshold in kilometers
    #[must_use]
    pub const fn kilometers(self) -> f64 {
        self.0
    }
}

impl FromStr for Threshold {
    type Err = ThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<f64>()
            .map_err(|_| ThresholdError::NotANumber(s.to_owned()))?;
        Self::new(value)
    }
}

/// Outcome of a full scan, including data-quality counters
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdScan {
    /// First record reaching the threshold, if any
    pub crossing: Option<ThresholdResult>,
    /// Number of records considered
    pub records_scanned: usize,
    /// Records with missing or invalid measurements read as zero
    pub degraded_records: usize,
    /// Accumulated distance over every record
    pub total_distance: f64,
}

/// Scan `records` for the first one at which the running total reaches `threshold`
///
/// All records are normalized so degraded inputs are counted even after the
/// crossing point.
#[must_use]
pub fn scan(records: &[ActivityRecord], threshold: Threshold) -> ThresholdScan {
    let ordered = chronological(records);

    let mut accumulated = 0.0_f64;
    let mut degraded_records = 0;
    let mut crossing = None;

    for record in ordered {
        let adjusted = adjust(record);
        if adjusted.degraded {
            degraded_records += 1;
        }
        accumulated += adjusted.kilometers;

        if crossing.is_none() && accumulated >= threshold.kilometers() {
            crossing = Some(ThresholdResult {
                record: record.clone(),
                adjusted_distance: adjusted.kilometers,
                accumulated_distance: accumulated,
            });
        }
    }

    ThresholdScan {
        crossing,
        records_scanned: records.len(),
        degraded_records,
        total_distance: accumulated,
    }
}

/// Order records by the instant their timestamp denotes
///
/// Offsets and fractional seconds are honored, and a bare date reads as
/// midnight UTC. If any timestamp cannot be parsed the whole set falls back to
/// plain string order. Both sorts are stable, so ties keep input order.
fn chronological(records: &[ActivityRecord]) -> Vec<&ActivityRecord> {
    let parsed: Option<Vec<(DateTime<Utc>, &ActivityRecord)>> = records
        .iter()
        .map(|record| parse_timestamp(&record.timestamp).map(|at| (at, record)))
        .collect();

    match parsed {
        Some(mut keyed) => {
            keyed.sort_by_key(|(at, _)| *at);
            keyed.into_iter().map(|(_, record)| record).collect()
        }
        None => {
            warn!("Unparseable activity timestamps, ordering records by timestamp text");
            let mut ordered: Vec<&ActivityRecord> = records.iter().collect();
            ordered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
            ordered
        }
    }
}

fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d")
        .ok()
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
}

/// Find the first record whose accumulated normalized distance reaches `threshold` km
///
/// Returns `Ok(None)` for empty input or when the threshold is never reached.
///
/// # Errors
///
/// Returns an error if `threshold` is negative, NaN or infinite; no scanning
/// happens in that case.
pub fn find_threshold_crossing(
    records: &[ActivityRecord],
    threshold: f64,
) -> Result<Option<ThresholdResult>, ThresholdError> {
    let threshold = Threshold::new(threshold)?;
    if records.is_empty() {
        return Ok(None);
    }
    Ok(scan(records, threshold).crossing)
}
