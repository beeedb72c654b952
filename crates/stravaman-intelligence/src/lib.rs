// ABOUTME: Activity normalization, threshold scanning, summaries and leaderboards
// ABOUTME: Pure, synchronous data transforms over flattened activity records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stravaman Intelligence
//!
//! The data-transformation kernel of the server. Nothing in here performs
//! I/O: callers hand over a fully materialized list of
//! [`ActivityRecord`](stravaman_core::models::ActivityRecord)s and get an
//! answer back synchronously.

/// Distance/time normalization onto a single kilometer axis
pub mod normalization;

/// First-crossing search over the accumulated distance of all athletes
pub mod threshold;

/// Per-athlete totals by activity type
pub mod summary;

/// Team rankings by adjusted distance
pub mod leaderboard;

pub use leaderboard::{build_leaderboard, Leaderboard, TeamStanding};
pub use normalization::{adjust, AdjustedDistance};
pub use summary::summarize_activities;
pub use threshold::{find_threshold_crossing, scan, Threshold, ThresholdError, ThresholdScan};
