// ABOUTME: Fitness data provider clients for the Stravaman server
// ABOUTME: ActivitySource trait and the Strava implementation used by the batch sync
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! Fitness data provider clients.
//!
//! The server only ever pulls activity listings, so the provider surface is a
//! single [`ActivitySource`] trait. Token exchange and refresh happen elsewhere;
//! callers hand in an access token that is already valid.

/// Strava API client
pub mod strava;

pub use strava::{StravaActivity, StravaClient};
pub use stravaman_core::errors::provider::{ProviderError, ProviderResult};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Source of an athlete's activities
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> &'static str;

    /// Every activity started after `after`, across all pages
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the token, throttles the
    /// request, cannot be reached, or returns an unparseable payload
    async fn activities_after(
        &self,
        access_token: &str,
        after: DateTime<Utc>,
    ) -> ProviderResult<Vec<StravaActivity>>;
}
