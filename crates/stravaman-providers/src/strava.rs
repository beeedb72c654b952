// ABOUTME: Strava REST client fetching an athlete's activities after a given date
// ABOUTME: Pages through /athlete/activities and maps failures onto ProviderError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::ActivitySource;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stravaman_core::constants::providers::{STRAVA, STRAVA_API_BASE_URL, STRAVA_MAX_PAGE_SIZE};
use stravaman_core::constants::timeouts::{
    API_CLIENT_CONNECT_TIMEOUT_SECS, API_CLIENT_TIMEOUT_SECS,
};
use stravaman_core::errors::provider::{ProviderError, ProviderResult};
use tracing::debug;

/// Summary activity as listed by `GET /athlete/activities`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StravaActivity {
    /// Strava activity id
    pub id: u64,
    /// Activity title
    #[serde(default)]
    pub name: Option<String>,
    /// Activity type ("Run", "Ride", "Yoga", ...)
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Start time (UTC)
    pub start_date: DateTime<Utc>,
    /// Distance in meters
    #[serde(default)]
    pub distance: Option<f64>,
    /// Elapsed time in seconds
    #[serde(default)]
    pub elapsed_time: Option<f64>,
}

/// Strava API client
#[derive(Debug, Clone)]
pub struct StravaClient {
    client: Client,
    api_base_url: String,
    page_size: usize,
}

impl StravaClient {
    /// Create a client against the public Strava API
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new() -> ProviderResult<Self> {
        Self::with_base_url(STRAVA_API_BASE_URL)
    }

    /// Create a client against a custom base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn with_base_url(api_base_url: impl Into<String>) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(API_CLIENT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(API_CLIENT_CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::Network {
                provider: STRAVA.to_owned(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_owned(),
            page_size: STRAVA_MAX_PAGE_SIZE,
        })
    }

    /// Override the page size (clamped to 1..=200)
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, STRAVA_MAX_PAGE_SIZE);
        self
    }

    /// Fetch one page of activities
    async fn activities_page(
        &self,
        access_token: &str,
        after: i64,
        page: usize,
    ) -> ProviderResult<Vec<StravaActivity>> {
        let url = format!("{}/athlete/activities", self.api_base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("after", after.to_string()),
                ("page", page.to_string()),
                ("per_page", self.page_size.to_string()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Network {
                provider: STRAVA.to_owned(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ProviderError::Network {
            provider: STRAVA.to_owned(),
            message: e.to_string(),
        })?;

        match status {
            s if s.is_success() => {
                serde_json::from_str(&body).map_err(|e| ProviderError::Parse {
                    provider: STRAVA.to_owned(),
                    message: e.to_string(),
                })
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ProviderError::AuthenticationFailed {
                    provider: STRAVA.to_owned(),
                    message: body,
                })
            }
            StatusCode::TOO_MANY_REQUESTS => Err(ProviderError::RateLimitExceeded {
                provider: STRAVA.to_owned(),
            }),
            other => Err(ProviderError::ApiError {
                provider: STRAVA.to_owned(),
                status: other.as_u16(),
                message: body,
            }),
        }
    }
}

#[async_trait]
impl ActivitySource for StravaClient {
    fn name(&self) -> &'static str {
        STRAVA
    }

    async fn activities_after(
        &self,
        access_token: &str,
        after: DateTime<Utc>,
    ) -> ProviderResult<Vec<StravaActivity>> {
        let after = after.timestamp();
        let mut activities = Vec::new();
        let mut page = 1;

        loop {
            let batch = self.activities_page(access_token, after, page).await?;
            let fetched = batch.len();
            debug!(page, fetched, "Fetched Strava activity page");
            activities.extend(batch);

            if fetched < self.page_size {
                break;
            }
            page += 1;
        }

        Ok(activities)
    }
}
