// ABOUTME: Core data models for the Stravaman server
// ABOUTME: Re-exports activity records, threshold results and athlete documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `ActivityRecord`: one activity of one athlete, flattened out of the store
//! - `ThresholdResult`: the crossing record returned by a threshold query
//! - `AthleteProfile`, `AthleteTokens`, `ActivitySummary`: per-athlete documents

mod activity;
mod athlete;

pub use activity::{ActivityRecord, MeasuredBy, ThresholdResult};
pub use athlete::{ActivitySummary, AthleteProfile, AthleteTokens};
