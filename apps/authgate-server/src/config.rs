//! Server configuration, layered with figment.
//!
//! Sources, later overriding earlier:
//! 1. Defaults (`#[serde(default)]` on every section)
//! 2. YAML file passed with `--config`
//! 3. `AUTHGATE_`-prefixed environment variables, `__` separating nested
//!    keys (`AUTHGATE_SERVER__BIND_ADDR=0.0.0.0:8080`)

use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use anyhow::Context;
use authn::AuthnConfig;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "AUTHGATE_";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub authn: AuthnConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

/// Load configuration from the optional YAML file and the environment.
///
/// Defaults are left to serde rather than merged in as a figment layer:
/// merging would blend the default adapter's fields into whichever adapter
/// the file selects.
///
/// # Errors
///
/// Fails if the file does not exist or the merged configuration does not
/// deserialize.
pub fn load(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut figment = Figment::new();

    if let Some(path) = path {
        anyhow::ensure!(
            path.exists(),
            "configuration file '{}' not found",
            path.display()
        );
        figment = figment.merge(Yaml::file(path));
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("invalid configuration")
}
