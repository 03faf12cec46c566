// ABOUTME: Server binary: loads configuration, opens the database, and serves the HTTP API
// ABOUTME: CLI flags override the port and database URL taken from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

//! # Fitness Companion Server Binary

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fitness_companion::{
    config::{DatabaseUrl, ServerConfig},
    logging,
    resources::ServerResources,
    server::run_server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fitness-companion-server")]
#[command(about = "Fitness Companion API - meal plans, health metrics, and challenges")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. `sqlite:./data/app.db` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env().context("Failed to load configuration")?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url);
    }

    logging::init_from_env().context("Failed to initialize logging")?;

    info!("Starting Fitness Companion API");
    info!("{}", config.summary());

    let resources = ServerResources::initialize(config)
        .await
        .context("Failed to initialize server resources")?;

    if let Err(e) = run_server(Arc::new(resources)).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
