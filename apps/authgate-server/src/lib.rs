//! authgate demo server
//!
//! Serves a tiny API guarded by the `authn` module so every adapter can be
//! exercised with curl or a browser.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod logging;
pub mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use authn::AuthnModule;
use clap::Parser;

/// Command line interface for the authgate demo server
#[derive(Parser, Debug)]
#[command(name = "authgate-server")]
#[command(about = "Demo HTTP server guarded by a configurable authenticator")]
#[command(version)]
pub struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listen address, overrides `server.bind_addr`
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Load configuration, wire the authn module and serve until Ctrl-C.
///
/// # Errors
///
/// Fails on invalid configuration, logging setup, module wiring or if the
/// listener cannot be bound.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut cfg = config::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        cfg.server.bind_addr = bind;
    }

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    logging::init_logging(&cfg.logging)?;

    let module = AuthnModule::from_config(&cfg.authn)?;
    let app = routes::build_router(&module);

    let listener = tokio::net::TcpListener::bind(cfg.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.bind_addr))?;
    tracing::info!(addr = %cfg.server.bind_addr, "authgate-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("authgate-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
