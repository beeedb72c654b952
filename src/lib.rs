// ABOUTME: Main library entry point for the Stravaman server
// ABOUTME: Strava activity sync, team leaderboards and accumulated-distance threshold queries over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stravaman Server
//!
//! Pulls athlete activities from Strava into a SQLite activity store, groups
//! athletes into teams, and answers "at which activity did everyone together
//! reach N km?" for a route and place.
//!
//! ## Architecture
//!
//! - **`stravaman-core`**: errors, models and constants
//! - **`stravaman-intelligence`**: normalization, threshold scan, summaries, leaderboards
//! - **`stravaman-providers`**: Strava API client
//! - this crate: configuration, logging, storage, services and the axum server
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use stravaman_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Stravaman configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// SQLite activity store
pub mod database;

/// Structured logging setup
pub mod logging;

/// Shared handler state
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Domain services used by the routes
pub mod services;

pub use stravaman_core::{constants, errors, models};
