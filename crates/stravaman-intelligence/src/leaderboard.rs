// ABOUTME: Team leaderboard aggregation over normalized activity distance
// ABOUTME: Ranks teams and their athletes by summed adjusted distance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Team leaderboard
//!
//! Uses the same normalization as the threshold scanner, so a team's total
//! is exactly what it contributed to the shared accumulated distance.

use crate::normalization::adjust;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use stravaman_core::models::ActivityRecord;

/// One athlete's line on the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteStanding {
    /// Strava athlete id
    pub athlete_id: String,
    /// First name
    pub firstname: Option<String>,
    /// Last name
    pub lastname: Option<String>,
    /// Number of activities counted
    pub activities: usize,
    /// Summed adjusted distance in km
    pub adjusted_distance: f64,
}

/// One team's line on the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    /// 1-based position
    pub rank: usize,
    /// Team label
    pub team: String,
    /// Summed adjusted distance in km
    pub adjusted_distance: f64,
    /// Athletes of the team, best first
    pub athletes: Vec<AthleteStanding>,
}

/// Ranked teams
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Teams, best first
    pub teams: Vec<TeamStanding>,
    /// Records that carried no team and were left out of the ranking
    pub unassigned_records: usize,
    /// Adjusted distance over all ranked teams in km
    pub total_distance: f64,
}

/// Rank teams by summed adjusted distance
///
/// Ties are broken by name so the ordering is stable across calls.
#[must_use]
pub fn build_leaderboard(records: &[ActivityRecord]) -> Leaderboard {
    let mut teams: BTreeMap<&str, BTreeMap<&str, AthleteStanding>> = BTreeMap::new();
    let mut unassigned_records = 0;

    for record in records {
        let Some(team) = record.team.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            unassigned_records += 1;
            continue;
        };

        let standing = teams
            .entry(team)
            .or_default()
            .entry(record.athlete_id.as_str())
            .or_insert_with(|| AthleteStanding {
                athlete_id: record.athlete_id.clone(),
                firstname: record.first_name.clone(),
                lastname: record.last_name.clone(),
                activities: 0,
                adjusted_distance: 0.0,
            });
        standing.activities += 1;
        standing.adjusted_distance += adjust(record).kilometers;
    }

    let mut standings: Vec<TeamStanding> = teams
        .into_iter()
        .map(|(team, athletes)| {
            let mut athletes: Vec<AthleteStanding> = athletes.into_values().collect();
            athletes.sort_by(|a, b| {
                by_distance_desc(a.adjusted_distance, b.adjusted_distance)
                    .then_with(|| a.athlete_id.cmp(&b.athlete_id))
            });
            TeamStanding {
                rank: 0,
                team: team.to_owned(),
                adjusted_distance: athletes.iter().map(|a| a.adjusted_distance).sum(),
                athletes,
            }
        })
        .collect();

    standings.sort_by(|a, b| {
        by_distance_desc(a.adjusted_distance, b.adjusted_distance)
            .then_with(|| a.team.cmp(&b.team))
    });
    for (index, standing) in standings.iter_mut().enumerate() {
        standing.rank = index + 1;
    }

    Leaderboard {
        total_distance: standings.iter().map(|t| t.adjusted_distance).sum(),
        teams: standings,
        unassigned_records,
    }
}

fn by_distance_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
