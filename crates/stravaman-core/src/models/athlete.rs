// ABOUTME: Athlete profile, stored provider tokens, and per-type activity summary models
// ABOUTME: Mirrors the per-athlete documents kept in the activity store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Athlete profile document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Strava athlete id
    pub athlete_id: String,
    /// First name
    pub firstname: Option<String>,
    /// Last name
    pub lastname: Option<String>,
    /// Team label chosen at registration
    pub team: Option<String>,
}

/// Strava tokens stored for an athlete by the authorization flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteTokens {
    /// Strava athlete id
    pub athlete_id: String,
    /// Bearer token for the Strava API
    pub access_token: String,
    /// Refresh token
    pub refresh_token: String,
    /// Access token expiry
    pub expires_at: DateTime<Utc>,
    /// Granted scopes
    pub scope: Option<String>,
}

/// Per-athlete activity totals
///
/// Totals are keyed by activity type: meters for distance-measured types,
/// seconds for time-measured ones. Serialized flat, so a summary reads
/// `{"Run": 12000.0, "Yoga": 3600.0, "firstname": ..., "update_date": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// First name at time of sync
    pub firstname: Option<String>,
    /// Last name at time of sync
    pub lastname: Option<String>,
    /// Day the summary was last refreshed
    pub update_date: Option<NaiveDate>,
    /// Activity type to total
    #[serde(flatten)]
    pub totals: BTreeMap<String, f64>,
}

impl ActivitySummary {
    /// Whether the summary was already refreshed on `today`
    #[must_use]
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.update_date == Some(today)
    }
}
