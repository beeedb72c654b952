// ABOUTME: Server binary for the Stravaman API
// ABOUTME: Loads configuration, opens the activity store and serves HTTP until Ctrl-C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Stravaman Server Binary

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use stravaman_providers::StravaClient;
use stravaman_server::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    logging,
    resources::ServerResources,
    server,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "stravaman-server")]
#[command(about = "Stravaman - Strava activity sync, team leaderboards and distance thresholds")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. sqlite:./data/stravaman.db)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url =
            DatabaseUrl::parse_url(&database_url).context("Invalid --database-url")?;
    }

    info!("{}", config.summary());

    if let DatabaseUrl::SQLite { path } = &config.database_url {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let database = Database::new(&config.database_url.to_connection_string()).await?;
    let strava = StravaClient::with_base_url(config.strava_api_base_url.clone())?;

    let resources = Arc::new(ServerResources::new(database, Arc::new(strava), config));
    server::serve(resources).await
}
