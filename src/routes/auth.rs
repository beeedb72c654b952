// ABOUTME: Shared-secret bearer authentication for the team data endpoints
// ABOUTME: Compares the presented token with the configured secret in constant time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::http::{header::AUTHORIZATION, HeaderMap};
use stravaman_core::errors::{AppError, AppResult};
use subtle::ConstantTimeEq;
use tracing::warn;

/// Check `Authorization: Bearer <secret>` against the configured secret
///
/// With no secret configured every request is refused.
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` when the header is missing and `AUTH_INVALID` when
/// it is malformed, does not match, or no secret is configured
pub fn require_api_secret(headers: &HeaderMap, secret: Option<&str>) -> AppResult<()> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(AppError::auth_required)?
        .to_str()
        .map_err(|_| AppError::auth_invalid("Authorization header is not valid UTF-8"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::auth_invalid("Authorization header must use the Bearer scheme"))?
        .trim();

    let Some(secret) = secret else {
        warn!("Rejecting request: no API secret configured");
        return Err(AppError::auth_invalid("API secret is not configured"));
    };

    if token.as_bytes().ct_eq(secret.as_bytes()).into() {
        Ok(())
    } else {
        warn!("Rejecting request with a wrong API secret");
        Err(AppError::auth_invalid("Invalid API secret"))
    }
}
