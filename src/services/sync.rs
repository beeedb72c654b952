// ABOUTME: Batch sync of athlete activities from Strava into the activity store
// ABOUTME: Walks token holders in id order, refreshes stale summaries, and zeroes athletes Strava refuses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Batch sync
//!
//! One call refreshes up to `batch` athletes. Athletes whose summary was
//! already refreshed today are skipped and do not count against the batch, so
//! repeated calls during a day walk through the whole athlete list.
//!
//! A provider failure for one athlete never fails the batch: the athlete gets
//! a summary with no totals (names and update date still set) and the sync
//! moves on.

use crate::database::Database;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stravaman_core::constants::formats;
use stravaman_core::errors::{AppError, AppResult, ErrorCode};
use stravaman_core::models::{ActivityRecord, ActivitySummary, AthleteTokens};
use stravaman_intelligence::summarize_activities;
use stravaman_providers::{ActivitySource, StravaActivity};
use tracing::{error, info};

/// Parsed `/strava_data/{date}/{batch}` parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncRequest {
    /// Only activities started after midnight (UTC) of this day are fetched
    pub after: NaiveDate,
    /// Maximum number of athletes queried
    pub batch: usize,
}

impl SyncRequest {
    /// Parse the raw path segments
    ///
    /// # Errors
    ///
    /// Returns `INVALID_FORMAT` when the date is not `YYYY-MM-DD` or the batch
    /// size is not an unsigned integer
    pub fn parse(date: &str, batch: &str) -> AppResult<Self> {
        let after = NaiveDate::parse_from_str(date, formats::DATE).map_err(|e| {
            AppError::new(
                ErrorCode::InvalidFormat,
                format!("Invalid start date '{date}', expected YYYY-MM-DD: {e}"),
            )
        })?;
        let batch = batch.trim().parse().map_err(|_| {
            AppError::new(
                ErrorCode::InvalidFormat,
                format!("Invalid batch size '{batch}', expected a non-negative integer"),
            )
        })?;
        Ok(Self { after, batch })
    }
}

/// What one batch did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Start date of the fetched window
    pub after: Option<NaiveDate>,
    /// Requested batch size
    pub batch: usize,
    /// Athletes queried, including failed ones
    pub queried: Vec<String>,
    /// Athletes skipped because their summary is current
    pub skipped: Vec<String>,
    /// Athletes whose provider request failed and got a zeroed summary
    pub failed: Vec<String>,
    /// Activity documents written
    pub activities_stored: usize,
    /// Whether token holders were left unvisited because the batch was full
    pub batch_limit_reached: bool,
}

/// Run one sync batch
///
/// # Errors
///
/// Returns an error if the token list cannot be read or a summary cannot be
/// written
pub async fn sync_batch(
    database: &Database,
    source: &dyn ActivitySource,
    request: SyncRequest,
    today: NaiveDate,
) -> AppResult<SyncReport> {
    let after = request.after.and_time(NaiveTime::MIN).and_utc();
    let tokens = database.list_athlete_tokens().await?;

    info!(
        after = %request.after,
        batch = request.batch,
        athletes = tokens.len(),
        provider = source.name(),
        "Starting activity sync"
    );

    let mut report = SyncReport {
        after: Some(request.after),
        batch: request.batch,
        ..SyncReport::default()
    };

    for athlete in &tokens {
        let current = database
            .get_activity_summary(&athlete.athlete_id)
            .await?
            .is_some_and(|summary| summary.is_current(today));
        if current {
            info!(athlete_id = %athlete.athlete_id, "Summary already current, skipping");
            report.skipped.push(athlete.athlete_id.clone());
            continue;
        }

        if report.queried.len() == request.batch {
            info!(batch = request.batch, "Batch limit reached");
            report.batch_limit_reached = true;
            break;
        }

        report.queried.push(athlete.athlete_id.clone());
        sync_athlete(database, source, athlete, after, today, &mut report).await?;
    }

    info!(
        queried = report.queried.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        activities = report.activities_stored,
        "Activity sync finished"
    );
    Ok(report)
}

async fn sync_athlete(
    database: &Database,
    source: &dyn ActivitySource,
    athlete: &AthleteTokens,
    after: chrono::DateTime<chrono::Utc>,
    today: NaiveDate,
    report: &mut SyncReport,
) -> AppResult<()> {
    let athlete_id = athlete.athlete_id.as_str();
    let profile = database.get_athlete_profile(athlete_id).await?;
    let (firstname, lastname) = profile
        .map(|p| (p.firstname, p.lastname))
        .unwrap_or_default();

    info!(athlete_id, ?firstname, ?lastname, "Requesting activity data");

    let totals = match source.activities_after(&athlete.access_token, after).await {
        Ok(activities) => {
            database.store_activities(athlete_id, &activities).await?;
            report.activities_stored += activities.len();
            let records: Vec<ActivityRecord> = activities
                .iter()
                .map(|activity| to_record(athlete_id, activity))
                .collect();
            summarize_activities(&records)
        }
        Err(e) => {
            error!(
                athlete_id,
                error = %e,
                "Could not get data from Strava, setting summary to zero"
            );
            report.failed.push(athlete_id.to_owned());
            BTreeMap::new()
        }
    };

    let summary = ActivitySummary {
        firstname,
        lastname,
        update_date: Some(today),
        totals,
    };
    database.upsert_activity_summary(athlete_id, &summary).await
}

fn to_record(athlete_id: &str, activity: &StravaActivity) -> ActivityRecord {
    ActivityRecord {
        athlete_id: athlete_id.to_owned(),
        first_name: None,
        last_name: None,
        team: None,
        activity_type: activity.activity_type.clone(),
        distance: activity.distance,
        elapsed_time: activity.elapsed_time,
        timestamp: activity.start_date.to_rfc3339(),
    }
}
