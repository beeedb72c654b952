// ABOUTME: Activity document and athlete summary database operations
// ABOUTME: Flattens the per-athlete activity store into threshold scan records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use chrono::{NaiveDate, SecondsFormat};
use sqlx::Row;
use std::collections::BTreeMap;
use stravaman_core::errors::{AppError, AppResult};
use stravaman_core::models::{ActivityRecord, ActivitySummary};
use stravaman_providers::StravaActivity;

/// A stored athlete summary joined with the athlete's team
#[derive(Debug, Clone, PartialEq)]
pub struct AthleteSummaryRow {
    /// Strava athlete id
    pub athlete_id: String,
    /// Team from the athlete's profile
    pub team: Option<String>,
    /// Last written summary
    pub summary: ActivitySummary,
}

/// Document key of an activity: its UTC start time to the second
fn activity_timestamp(activity: &StravaActivity) -> String {
    activity
        .start_date
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl Database {
    pub(super) async fn migrate_activities(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS athlete_activities (
                athlete_id TEXT NOT NULL,
                activity_type TEXT NOT NULL,
                start_date TEXT NOT NULL,
                activity_id TEXT NOT NULL,
                name TEXT,
                distance REAL,
                elapsed_time REAL,
                PRIMARY KEY (athlete_id, activity_type, start_date)
            )
            ",
        )
        .await?;

        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS activity_summaries (
                athlete_id TEXT PRIMARY KEY,
                firstname TEXT,
                lastname TEXT,
                update_date TEXT,
                totals TEXT NOT NULL
            )
            ",
        )
        .await
    }

    /// Store activities of one athlete, replacing documents with the same key
    ///
    /// # Errors
    /// Returns an error if the transaction fails
    pub async fn store_activities(
        &self,
        athlete_id: &str,
        activities: &[StravaActivity],
    ) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        for activity in activities {
            sqlx::query(
                r"
                INSERT OR REPLACE INTO athlete_activities
                    (athlete_id, activity_type, start_date, activity_id, name, distance, elapsed_time)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(athlete_id)
            .bind(&activity.activity_type)
            .bind(activity_timestamp(activity))
            .bind(activity.id.to_string())
            .bind(&activity.name)
            .bind(activity.distance)
            .bind(activity.elapsed_time)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to store activity: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit activities: {e}")))?;
        Ok(())
    }

    /// Every stored activity as a scan record carrying the athlete's name and team
    ///
    /// Rows come back grouped by athlete and type in key order, so the record
    /// order is the same on every call for the same store contents.
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub async fn list_activity_records(&self) -> AppResult<Vec<ActivityRecord>> {
        let rows = sqlx::query(
            r"
            SELECT a.athlete_id, p.firstname, p.lastname, p.team,
                   a.activity_type, a.start_date, a.distance, a.elapsed_time
            FROM athlete_activities a
            LEFT JOIN athlete_profiles p ON p.athlete_id = a.athlete_id
            ORDER BY a.athlete_id, a.activity_type, a.start_date
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list activities: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| ActivityRecord {
                athlete_id: row.get("athlete_id"),
                first_name: row.get("firstname"),
                last_name: row.get("lastname"),
                team: row.get("team"),
                activity_type: row.get("activity_type"),
                distance: row.get("distance"),
                elapsed_time: row.get("elapsed_time"),
                timestamp: row.get("start_date"),
            })
            .collect())
    }

    /// Insert or replace an athlete's summary
    ///
    /// # Errors
    /// Returns an error if the totals cannot be serialized or the write fails
    pub async fn upsert_activity_summary(
        &self,
        athlete_id: &str,
        summary: &ActivitySummary,
    ) -> AppResult<()> {
        let totals = serde_json::to_string(&summary.totals)?;

        sqlx::query(
            r"
            INSERT OR REPLACE INTO activity_summaries
                (athlete_id, firstname, lastname, update_date, totals)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(athlete_id)
        .bind(&summary.firstname)
        .bind(&summary.lastname)
        .bind(summary.update_date)
        .bind(totals)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store activity summary: {e}")))?;

        Ok(())
    }

    /// Get an athlete's summary
    ///
    /// # Errors
    /// Returns an error if the query fails or the stored totals are corrupt
    pub async fn get_activity_summary(&self, athlete_id: &str) -> AppResult<Option<ActivitySummary>> {
        let row = sqlx::query(
            r"
            SELECT firstname, lastname, update_date, totals
            FROM activity_summaries WHERE athlete_id = $1
            ",
        )
        .bind(athlete_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query activity summary: {e}")))?;

        row.map(|row| {
            summary_from_parts(
                row.get("firstname"),
                row.get("lastname"),
                row.get("update_date"),
                row.get("totals"),
            )
        })
        .transpose()
    }

    /// Every stored summary with the athlete's team, ordered by athlete id
    ///
    /// # Errors
    /// Returns an error if the query fails or stored totals are corrupt
    pub async fn list_activity_summaries(&self) -> AppResult<Vec<AthleteSummaryRow>> {
        let rows = sqlx::query(
            r"
            SELECT s.athlete_id, p.team, s.firstname, s.lastname, s.update_date, s.totals
            FROM activity_summaries s
            LEFT JOIN athlete_profiles p ON p.athlete_id = s.athlete_id
            ORDER BY s.athlete_id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list activity summaries: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(AthleteSummaryRow {
                    athlete_id: row.get("athlete_id"),
                    team: row.get("team"),
                    summary: summary_from_parts(
                        row.get("firstname"),
                        row.get("lastname"),
                        row.get("update_date"),
                        row.get("totals"),
                    )?,
                })
            })
            .collect()
    }
}

fn summary_from_parts(
    firstname: Option<String>,
    lastname: Option<String>,
    update_date: Option<NaiveDate>,
    totals: String,
) -> AppResult<ActivitySummary> {
    let totals: BTreeMap<String, f64> = serde_json::from_str(&totals)?;
    Ok(ActivitySummary {
        firstname,
        lastname,
        update_date,
        totals,
    })
}
