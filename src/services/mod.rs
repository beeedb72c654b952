// ABOUTME: Domain service layer between route handlers and the activity store
// ABOUTME: Threshold queries, Strava batch sync, and team views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers stay thin: they extract and authenticate, then delegate
//! here. Services take the database (and provider) by reference and return
//! `AppResult`, so they are exercised directly in unit tests.

/// Strava batch sync
pub mod sync;

/// Threshold queries with route/place caching
pub mod threshold;

/// Team registration, team activity data and leaderboards
pub mod teams;
