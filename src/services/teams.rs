// ABOUTME: Team registration and team-level views over athlete data
// ABOUTME: Groups stored summaries by team and ranks teams on normalized distance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database::Database;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stravaman_core::errors::{AppError, AppResult, ErrorCode};
use stravaman_core::models::{ActivitySummary, AthleteProfile};
use stravaman_intelligence::{build_leaderboard, Leaderboard};
use tracing::{info, warn};

/// An athlete's summary as listed under their team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMemberSummary {
    /// Stored summary, flattened
    #[serde(flatten)]
    pub summary: ActivitySummary,
    /// The athlete's team
    pub team: String,
}

/// Team name to athlete id to summary
pub type TeamActivityData = BTreeMap<String, BTreeMap<String, TeamMemberSummary>>;

/// Assign an athlete to a team
///
/// # Errors
///
/// Returns `MISSING_REQUIRED_FIELD` for a blank team or athlete id, or a
/// database error if the profile cannot be written
pub async fn register_team(
    database: &Database,
    athlete_id: &str,
    team: &str,
) -> AppResult<AthleteProfile> {
    let athlete_id = athlete_id.trim();
    let team = team.trim();
    if athlete_id.is_empty() {
        return Err(AppError::new(
            ErrorCode::MissingRequiredField,
            "athleteid is required",
        ));
    }
    if team.is_empty() {
        return Err(AppError::new(
            ErrorCode::MissingRequiredField,
            "team is required",
        ));
    }

    let profile = database.set_athlete_team(athlete_id, team).await?;
    info!(athlete_id, team, "Athlete registered to team");
    Ok(profile)
}

/// Every stored summary grouped by team
///
/// Athletes without a team cannot be placed and are logged and left out.
///
/// # Errors
///
/// Returns a database error if the summaries cannot be read
pub async fn team_activity_data(database: &Database) -> AppResult<TeamActivityData> {
    let mut data = TeamActivityData::new();

    for row in database.list_activity_summaries().await? {
        let Some(team) = row.team.filter(|t| !t.trim().is_empty()) else {
            warn!(athlete_id = %row.athlete_id, "Cannot find team for athlete, leaving out of activity data");
            continue;
        };
        data.entry(team.clone()).or_default().insert(
            row.athlete_id,
            TeamMemberSummary {
                summary: row.summary,
                team,
            },
        );
    }

    Ok(data)
}

/// Rank teams over every stored activity
///
/// # Errors
///
/// Returns a database error if the activity store cannot be read
pub async fn team_leaderboard(database: &Database) -> AppResult<Leaderboard> {
    let records = database.list_activity_records().await?;
    let leaderboard = build_leaderboard(&records);
    if leaderboard.unassigned_records > 0 {
        warn!(
            unassigned = leaderboard.unassigned_records,
            "Activities of athletes without a team left out of the leaderboard"
        );
    }
    Ok(leaderboard)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use super::*;
    use crate::database::test_support::create_test_db;

    fn summary(run_meters: f64) -> ActivitySummary {
        ActivitySummary {
            firstname: Some("Ada".to_owned()),
            lastname: None,
            update_date: None,
            totals: BTreeMap::from([("Run".to_owned(), run_meters)]),
        }
    }

    #[tokio::test]
    async fn test_blank_fields_rejected() {
        let db = create_test_db().await;
        let error = register_team(&db, " ", "Red").await.unwrap_err();
        assert_eq!(error.code, ErrorCode::MissingRequiredField);
        let error = register_team(&db, "1", "").await.unwrap_err();
        assert_eq!(error.code, ErrorCode::MissingRequiredField);
        assert!(db.get_athlete_profile("1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_activity_data_grouped_by_team() {
        let db = create_test_db().await;
        register_team(&db, "1", " Red ").await.unwrap();
        register_team(&db, "2", "Blue").await.unwrap();
        db.upsert_activity_summary("1", &summary(5000.0)).await.unwrap();
        db.upsert_activity_summary("2", &summary(7000.0)).await.unwrap();
        db.upsert_activity_summary("3", &summary(9000.0)).await.unwrap();

        let data = team_activity_data(&db).await.unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data["Red"]["1"].team, "Red");
        assert_eq!(data["Red"]["1"].summary.totals["Run"], 5000.0);
        assert_eq!(data["Blue"]["2"].summary.totals["Run"], 7000.0);
        assert!(data.values().all(|members| !members.contains_key("3")));

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["Red"]["1"]["Run"], 5000.0);
        assert_eq!(json["Red"]["1"]["team"], "Red");
    }
}
