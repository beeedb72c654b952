// ABOUTME: Structured error types for fitness provider operations
// ABOUTME: Distinguishes auth, rate-limit, transport and payload failures from the Strava API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors returned by a fitness data provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider rejected the access token (HTTP 401/403)
    #[error("{provider} rejected the access token: {message}")]
    AuthenticationFailed {
        /// Provider name
        provider: String,
        /// Response body or reason
        message: String,
    },

    /// The provider throttled the request (HTTP 429)
    #[error("{provider} rate limit exceeded")]
    RateLimitExceeded {
        /// Provider name
        provider: String,
    },

    /// The provider answered with an unexpected status
    #[error("{provider} API error (status {status}): {message}")]
    ApiError {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// The request never completed
    #[error("{provider} request failed: {message}")]
    Network {
        /// Provider name
        provider: String,
        /// Transport error description
        message: String,
    },

    /// The response body could not be decoded
    #[error("{provider} returned an unparseable payload: {message}")]
    Parse {
        /// Provider name
        provider: String,
        /// Decoding error description
        message: String,
    },
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        let code = match &error {
            ProviderError::AuthenticationFailed { .. } => ErrorCode::ExternalAuthFailed,
            ProviderError::RateLimitExceeded { .. } => ErrorCode::ExternalRateLimited,
            ProviderError::Network { .. } => ErrorCode::ExternalServiceUnavailable,
            ProviderError::ApiError { .. } | ProviderError::Parse { .. } => {
                ErrorCode::ExternalServiceError
            }
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
