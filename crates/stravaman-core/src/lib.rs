// ABOUTME: Core types and constants for the Stravaman team distance server
// ABOUTME: Foundation crate with error handling, activity models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stravaman Core
//!
//! Shared types for the Stravaman workspace. This crate changes rarely so the
//! server, intelligence and provider crates can compile against it in parallel.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and provider errors
//! - **constants**: Unit conversions, activity classification and defaults
//! - **models**: Activity records, threshold results and athlete documents

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`ActivityRecord`, `ThresholdResult`, athlete documents)
pub mod models;
