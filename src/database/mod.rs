// ABOUTME: SQLite activity store for athlete profiles, tokens, activities, summaries and threshold answers
// ABOUTME: Owns the connection pool and creates the schema at start-up
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Activity store
//!
//! Per-athlete documents kept in SQLite:
//!
//! - `athlete_profiles`: name and team
//! - `athlete_tokens`: Strava tokens written by the authorization flow
//! - `athlete_activities`: one row per activity, keyed by athlete, type and start time
//! - `activity_summaries`: per-type totals of the last sync
//! - `threshold_results`: answered threshold queries keyed by route and place

mod activities;
mod athletes;
mod thresholds;

pub use activities::AthleteSummaryRow;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use stravaman_core::errors::{AppError, AppResult};
use tracing::info;

/// Database manager for the activity store
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if missing) the database and create its tables
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the database cannot be opened
    /// or the schema cannot be created
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL '{database_url}': {e}")))?
            .create_if_missing(true);

        // An in-memory database lives only as long as its connections
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        info!("Database ready at {database_url}");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Check that the database answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the probe query fails
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Create every table the store uses
    ///
    /// # Errors
    ///
    /// Returns an error if a `CREATE TABLE` statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_athletes().await?;
        self.migrate_activities().await?;
        self.migrate_thresholds().await?;
        Ok(())
    }

    async fn execute_ddl(&self, statement: &str) -> AppResult<()> {
        sqlx::query(statement)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create schema: {e}")))?;
        Ok(())
    }
}
