// ABOUTME: Server binary for the Smart Recipe Generator HTTP API
// ABOUTME: Loads layered configuration, initializes logging and serves until Ctrl-C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

//! # Smart Recipe Server Binary
//!
//! Starts the recipe API. Without `AI__ENDPOINT` every request is answered
//! by the local placeholder generator.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use smart_recipe_server::{
    config::environment::ServerConfig, logging, recipes::RecipeGenerator, routes::build_router,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "smart-recipe-server")]
#[command(about = "Smart Recipe Generator API - ingredient lists in, recipes out")]
pub struct Args {
    /// Settings file (JSON or YAML) with an `AI` section
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Missing .env is the normal case
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    logging::init_from_env()?;
    if !dotenv_loaded {
        info!("No .env file loaded; using process environment only");
    }

    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    info!("{}", config.summary());
    if !config.ai.has_endpoint() {
        warn!("AI endpoint not configured; all recipes will come from the placeholder generator");
    }

    let generator = Arc::new(RecipeGenerator::new(config.ai.clone()));
    let app = build_router(&config, generator);

    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind to {bind_address}"))?;

    info!("Server listening on {bind_address}");
    display_available_endpoints(&config);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shut down cleanly");
    Ok(())
}

/// Display the available API endpoints
fn display_available_endpoints(config: &ServerConfig) {
    let base = format!("http://{}", config.bind_address());
    info!("=== Available API Endpoints ===");
    info!("  GET  {base}/api/recipes");
    info!("  POST {base}/api/recipes/generate");
    info!("  GET  {base}/api/recipes/{{id}}");
    info!("  GET  {base}/health");
    info!("  GET  {base}/ready");
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
