// ABOUTME: Athlete profile and Strava token database operations
// ABOUTME: Team registration and the token list driving the batch sync
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use chrono::DateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use stravaman_core::errors::{AppError, AppResult};
use stravaman_core::models::{AthleteProfile, AthleteTokens};

fn profile_from_row(row: &SqliteRow) -> AthleteProfile {
    AthleteProfile {
        athlete_id: row.get("athlete_id"),
        firstname: row.get("firstname"),
        lastname: row.get("lastname"),
        team: row.get("team"),
    }
}

impl Database {
    pub(super) async fn migrate_athletes(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS athlete_profiles (
                athlete_id TEXT PRIMARY KEY,
                firstname TEXT,
                lastname TEXT,
                team TEXT,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .await?;

        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS athlete_tokens (
                athlete_id TEXT PRIMARY KEY,
                access_token TEXT NOT NULL,
                refresh_token TEXT NOT NULL,
                expires_at INTEGER NOT NULL,
                scope TEXT
            )
            ",
        )
        .await
    }

    /// Insert or replace an athlete profile
    ///
    /// # Errors
    /// Returns an error if the database write fails
    pub async fn upsert_athlete_profile(&self, profile: &AthleteProfile) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO athlete_profiles (athlete_id, firstname, lastname, team, updated_at)
            VALUES ($1, $2, $3, $4, CURRENT_TIMESTAMP)
            ON CONFLICT(athlete_id) DO UPDATE SET
                firstname = excluded.firstname,
                lastname = excluded.lastname,
                team = excluded.team,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(&profile.athlete_id)
        .bind(&profile.firstname)
        .bind(&profile.lastname)
        .bind(&profile.team)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store athlete profile: {e}")))?;

        Ok(())
    }

    /// Get an athlete's profile
    ///
    /// # Errors
    /// Returns an error if the database query fails
    pub async fn get_athlete_profile(&self, athlete_id: &str) -> AppResult<Option<AthleteProfile>> {
        let row = sqlx::query(
            "SELECT athlete_id, firstname, lastname, team FROM athlete_profiles WHERE athlete_id = $1",
        )
        .bind(athlete_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query athlete profile: {e}")))?;

        Ok(row.as_ref().map(profile_from_row))
    }

    /// Assign an athlete to a team, creating a bare profile if none exists
    ///
    /// # Errors
    /// Returns an error if the database write fails
    pub async fn set_athlete_team(&self, athlete_id: &str, team: &str) -> AppResult<AthleteProfile> {
        let row = sqlx::query(
            r"
            INSERT INTO athlete_profiles (athlete_id, team, updated_at)
            VALUES ($1, $2, CURRENT_TIMESTAMP)
            ON CONFLICT(athlete_id) DO UPDATE SET
                team = excluded.team,
                updated_at = CURRENT_TIMESTAMP
            RETURNING athlete_id, firstname, lastname, team
            ",
        )
        .bind(athlete_id)
        .bind(team)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to set athlete team: {e}")))?;

        Ok(profile_from_row(&row))
    }

    /// Insert or replace an athlete's Strava tokens
    ///
    /// # Errors
    /// Returns an error if the database write fails
    pub async fn upsert_athlete_tokens(&self, tokens: &AthleteTokens) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO athlete_tokens (athlete_id, access_token, refresh_token, expires_at, scope)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(athlete_id) DO UPDATE SET
                access_token = excluded.access_token,
                refresh_token = excluded.refresh_token,
                expires_at = excluded.expires_at,
                scope = excluded.scope
            ",
        )
        .bind(&tokens.athlete_id)
        .bind(&tokens.access_token)
        .bind(&tokens.refresh_token)
        .bind(tokens.expires_at.timestamp())
        .bind(&tokens.scope)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store athlete tokens: {e}")))?;

        Ok(())
    }

    /// Every athlete holding tokens, ordered by athlete id
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored expiry is out of range
    pub async fn list_athlete_tokens(&self) -> AppResult<Vec<AthleteTokens>> {
        let rows = sqlx::query(
            r"
            SELECT athlete_id, access_token, refresh_token, expires_at, scope
            FROM athlete_tokens
            ORDER BY athlete_id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list athlete tokens: {e}")))?;

        rows.iter()
            .map(|row| {
                let expires_at: i64 = row.get("expires_at");
                Ok(AthleteTokens {
                    athlete_id: row.get("athlete_id"),
                    access_token: row.get("access_token"),
                    refresh_token: row.get("refresh_token"),
                    expires_at: DateTime::from_timestamp(expires_at, 0).ok_or_else(|| {
                        AppError::internal(format!("Invalid token expiry timestamp: {expires_at}"))
                    })?,
                    scope: row.get("scope"),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::database::test_support::create_test_db;
    use chrono::Utc;

    fn tokens(athlete_id: &str) -> AthleteTokens {
        AthleteTokens {
            athlete_id: athlete_id.to_owned(),
            access_token: format!("access-{athlete_id}"),
            refresh_token: format!("refresh-{athlete_id}"),
            expires_at: DateTime::from_timestamp(Utc::now().timestamp(), 0).unwrap(),
            scope: Some("activity:read_all".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_team_registration_creates_profile() {
        let db = create_test_db().await;

        let profile = db.set_athlete_team("42", "Red").await.unwrap();
        assert_eq!(profile.team.as_deref(), Some("Red"));
        assert_eq!(profile.firstname, None);

        db.upsert_athlete_profile(&AthleteProfile {
            athlete_id: "42".to_owned(),
            firstname: Some("Ada".to_owned()),
            lastname: Some("Lovelace".to_owned()),
            team: Some("Red".to_owned()),
        })
        .await
        .unwrap();

        let moved = db.set_athlete_team("42", "Blue").await.unwrap();
        assert_eq!(moved.team.as_deref(), Some("Blue"));
        assert_eq!(moved.firstname.as_deref(), Some("Ada"));
        assert_eq!(db.get_athlete_profile("42").await.unwrap(), Some(moved));
        assert_eq!(db.get_athlete_profile("7").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_tokens_listed_by_athlete_id() {
        let db = create_test_db().await;
        for id in ["300", "100", "200"] {
            db.upsert_athlete_tokens(&tokens(id)).await.unwrap();
        }
        let mut updated = tokens("100");
        updated.access_token = "rotated".to_owned();
        db.upsert_athlete_tokens(&updated).await.unwrap();

        let listed = db.list_athlete_tokens().await.unwrap();
        let ids: Vec<_> = listed.iter().map(|t| t.athlete_id.as_str()).collect();
        assert_eq!(ids, vec!["100", "200", "300"]);
        assert_eq!(listed[0], updated);
    }
}
