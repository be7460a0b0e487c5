//! Tracing subscriber setup.

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` overrides `cfg.level`.
///
/// # Errors
///
/// Fails on invalid filter directives or if a subscriber is already set.
pub fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => env_filter(&cfg.level)?,
    };
    let registry = tracing_subscriber::registry().with(filter);

    if cfg.json {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()?;
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()?;
    }

    tracing::info!(level = %cfg.level, json = cfg.json, "Logging initialized");
    Ok(())
}

fn env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))
}
