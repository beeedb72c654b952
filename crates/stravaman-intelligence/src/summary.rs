// ABOUTME: Per-athlete activity totals grouped by activity type
// ABOUTME: Sums meters for distance-measured types and seconds for time-measured ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use stravaman_core::models::{ActivityRecord, MeasuredBy};

/// Total each activity type of an athlete in its native unit
///
/// Workout and Yoga add up elapsed seconds, every other type adds up meters.
/// Missing, negative or non-finite measurements count as zero.
pub fn summarize_activities<'a, I>(records: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a ActivityRecord>,
{
    let mut totals = BTreeMap::new();
    for record in records {
        let amount = match MeasuredBy::for_activity_type(&record.activity_type) {
            MeasuredBy::Time => record.elapsed_time,
            MeasuredBy::Distance => record.distance,
        }
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0);

        *totals.entry(record.activity_type.clone()).or_insert(0.0) += amount;
    }
    totals
}
