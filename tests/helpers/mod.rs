// ABOUTME: Shared test helpers for integration tests
// ABOUTME: Router request helpers and a local stand-in for the Strava API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod axum_test;
pub mod strava_stub;
