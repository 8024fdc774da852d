//! cmskit HTTP server
//!
//! Serves the consent requirement endpoint and the select-search endpoint
//! for a site.
//!
//! Usage:
//!   cmskit-server --config cmskit.toml --port 3000

use anyhow::{Context, Result};
use clap::Parser;
use cmskit_server::{ServerConfig, build_router};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "cmskit-server")]
#[command(about = "cmskit consent and select-search endpoints")]
struct Args {
    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to the TOML config file
    #[arg(short, long, default_value = "cmskit.toml")]
    config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let mut config = ServerConfig::load(&args.config)?;
    if let Some(port) = args.port {
        config.port = port;
    }

    let state = Arc::new(config.build_state()?);
    info!(
        consent_path = %state.consent_api_path,
        tokens = state.api_tokens.len(),
        searchable_fields = state.search.registry().len(),
        "cmskit server starting"
    );

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;
    info!("Listening on port {}", config.port);
    axum::serve(listener, build_router(state))
        .await
        .context("HTTP server failed")?;
    Ok(())
}
