//! Configuration for the `AuthN` module.

use std::collections::BTreeMap;
use std::path::PathBuf;

use basic_authn_plugin::BasicAuthnPluginConfig;
use bearer_authn_plugin::BearerAuthnPluginConfig;
use serde::{Deserialize, Serialize};
use session_authn_plugin::SessionAuthnPluginConfig;

/// Module configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthnConfig {
    /// Which authenticator guards the protected routes.
    pub adapter: AdapterConfig,

    /// Where the basic and session adapters look users up.
    pub users: UserSourceConfig,

    /// Routes served without authentication.
    ///
    /// Each entry is a path pattern, optionally prefixed with a method:
    /// `"/health"`, `"GET /docs/{*rest}"`. Axum-style `:param` segments are
    /// accepted as well.
    pub public_routes: Vec<String>,

    /// What to do when a collaborator fails during authentication.
    pub on_collaborator_error: CollaboratorFailurePolicy,
}

/// Authenticator selection, tagged by `type`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdapterConfig {
    Basic(BasicAuthnPluginConfig),
    Bearer(BearerAuthnPluginConfig),
    Session(SessionAuthnPluginConfig),
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self::Bearer(BearerAuthnPluginConfig::default())
    }
}

impl AdapterConfig {
    /// Name used in logs and in the `type` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Basic(_) => "basic",
            Self::Bearer(_) => "bearer",
            Self::Session(_) => "session",
        }
    }

    /// Whether this adapter checks passwords against a user source.
    #[must_use]
    pub fn needs_users(&self) -> bool {
        matches!(self, Self::Basic(_) | Self::Session(_))
    }
}

/// User source, tagged by `source`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "source", rename_all = "snake_case", deny_unknown_fields)]
pub enum UserSourceConfig {
    /// Users listed in the configuration with bcrypt password hashes.
    Inline {
        #[serde(default)]
        users: Vec<UserConfig>,
    },
    /// Apache htpasswd file with bcrypt entries.
    Htpasswd {
        path: PathBuf,
        /// Roles per user name; htpasswd itself carries none.
        #[serde(default)]
        roles: BTreeMap<String, Vec<String>>,
    },
}

impl Default for UserSourceConfig {
    fn default() -> Self {
        Self::Inline { users: Vec::new() }
    }
}

/// A user defined inline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    pub username: String,

    /// bcrypt hash (`$2a$`, `$2b$` or `$2y$`).
    pub password_hash: String,

    #[serde(default)]
    pub roles: Vec<String>,

    #[serde(default)]
    pub details: BTreeMap<String, serde_json::Value>,
}

/// Failure policy applied when an authenticator reports a collaborator error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaboratorFailurePolicy {
    /// Treat the request as unauthenticated (fail-closed).
    #[default]
    Reject,
    /// Answer `503`/`500` so clients can tell an outage from bad credentials.
    Fail,
}
