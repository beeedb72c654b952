// ABOUTME: Threshold answer cache keyed by route and place
// ABOUTME: Stores crossings as JSON so a repeated query never rescans the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use sqlx::Row;
use stravaman_core::errors::{AppError, AppResult};
use stravaman_core::models::ThresholdResult;

impl Database {
    pub(super) async fn migrate_thresholds(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS threshold_results (
                route TEXT NOT NULL,
                place TEXT NOT NULL,
                distance REAL NOT NULL,
                result TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (route, place)
            )
            ",
        )
        .await
    }

    /// Cached answer for `(route, place)`
    ///
    /// # Errors
    /// Returns an error if the query fails or the stored answer is corrupt
    pub async fn get_threshold_result(
        &self,
        route: &str,
        place: &str,
    ) -> AppResult<Option<ThresholdResult>> {
        let row = sqlx::query("SELECT result FROM threshold_results WHERE route = $1 AND place = $2")
            .bind(route)
            .bind(place)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to query threshold cache: {e}")))?;

        row.map(|row| {
            let result: String = row.get("result");
            serde_json::from_str(&result).map_err(AppError::from)
        })
        .transpose()
    }

    /// Cache the answer for `(route, place)`
    ///
    /// # Errors
    /// Returns an error if the answer cannot be serialized or the write fails
    pub async fn store_threshold_result(
        &self,
        route: &str,
        place: &str,
        distance: f64,
        result: &ThresholdResult,
    ) -> AppResult<()> {
        let json = serde_json::to_string(result)?;

        sqlx::query(
            r"
            INSERT OR REPLACE INTO threshold_results (route, place, distance, result)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(route)
        .bind(place)
        .bind(distance)
        .bind(json)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store threshold result: {e}")))?;

        Ok(())
    }
}
