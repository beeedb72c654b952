// ABOUTME: Activity models including ActivityRecord, ThresholdResult and activity classification
// ABOUTME: Flat per-activity records consumed by the threshold scanner and leaderboards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::activity_types;

/// How an activity type contributes to accumulated distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasuredBy {
    /// Contribution is the distance covered
    Distance,
    /// Contribution is the elapsed time (Workout, Yoga)
    Time,
}

impl MeasuredBy {
    /// Classify a Strava activity type tag
    #[must_use]
    pub fn for_activity_type(activity_type: &str) -> Self {
        if activity_types::TIME_MEASURED.contains(&activity_type) {
            Self::Time
        } else {
            Self::Distance
        }
    }
}

/// One activity of one athlete, flattened out of the store
///
/// `distance` and `elapsed_time` are optional because stored documents can be
/// incomplete; consumers treat a missing value as zero and report it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Strava athlete id
    pub athlete_id: String,
    /// Athlete first name
    #[serde(rename = "firstname")]
    pub first_name: Option<String>,
    /// Athlete last name
    #[serde(rename = "lastname")]
    pub last_name: Option<String>,
    /// Team label, carried as metadata
    pub team: Option<String>,
    /// Strava activity type ("Run", "Ride", "Workout", ...)
    pub activity_type: String,
    /// Distance in meters, zero when not tracked
    pub distance: Option<f64>,
    /// Elapsed time in seconds
    pub elapsed_time: Option<f64>,
    /// ISO-8601 start timestamp
    pub timestamp: String,
}

impl ActivityRecord {
    /// Create a record with both measurements present
    pub fn new(
        athlete_id: impl Into<String>,
        activity_type: impl Into<String>,
        timestamp: impl Into<String>,
        distance: f64,
        elapsed_time: f64,
    ) -> Self {
        Self {
            athlete_id: athlete_id.into(),
            first_name: None,
            last_name: None,
            team: None,
            activity_type: activity_type.into(),
            distance: Some(distance),
            elapsed_time: Some(elapsed_time),
            timestamp: timestamp.into(),
        }
    }

    /// Attach the athlete's display name
    #[must_use]
    pub fn with_name(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    /// Attach the athlete's team
    #[must_use]
    pub fn with_team(mut self, team: Option<String>) -> Self {
        self.team = team;
        self
    }
}

/// The record at which the accumulated distance first reached a threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdResult {
    /// The crossing record, unchanged
    #[serde(flatten)]
    pub record: ActivityRecord,
    /// Normalized contribution of the crossing record, in km
    pub adjusted_distance: f64,
    /// Running total including the crossing record, in km
    pub accumulated_distance: f64,
}
