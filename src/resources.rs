// ABOUTME: Shared server state handed to every route handler
// ABOUTME: Bundles the activity store, the activity provider and the loaded configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ServerConfig;
use crate::database::Database;
use std::sync::Arc;
use stravaman_providers::ActivitySource;

/// Resources shared by all handlers, created once at start-up
#[derive(Clone)]
pub struct ServerResources {
    /// Activity store
    pub database: Arc<Database>,
    /// Where the batch sync pulls activities from
    pub activity_source: Arc<dyn ActivitySource>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wrap the pieces for sharing across handlers
    pub fn new(
        database: Database,
        activity_source: Arc<dyn ActivitySource>,
        config: ServerConfig,
    ) -> Self {
        Self {
            database: Arc::new(database),
            activity_source,
            config: Arc::new(config),
        }
    }
}
