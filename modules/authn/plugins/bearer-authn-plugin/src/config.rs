//! Configuration for the bearer `AuthN` plugin.

use std::collections::BTreeMap;

use authn_sdk::Identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BearerAuthnPluginConfig {
    /// Realm advertised in the `WWW-Authenticate` challenge, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,

    /// Token verification mode.
    pub mode: TokenMode,

    /// Identity returned in `accept_all` mode.
    pub default_identity: IdentityConfig,

    /// Static token-to-identity mappings for `static_tokens` mode.
    pub tokens: Vec<TokenMapping>,
}

impl Default for BearerAuthnPluginConfig {
    fn default() -> Self {
        Self {
            realm: None,
            mode: TokenMode::StaticTokens,
            default_identity: IdentityConfig::default(),
            tokens: Vec::new(),
        }
    }
}

/// Token verification mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TokenMode {
    /// Accept any non-empty token and return the default identity.
    AcceptAll,
    /// Map specific tokens to specific identities.
    #[default]
    StaticTokens,
}

/// Identity configuration for a principal.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    pub id: String,
    pub roles: Vec<String>,
    pub details: BTreeMap<String, serde_json::Value>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            id: "dev-user".to_owned(),
            roles: Vec::new(),
            details: BTreeMap::new(),
        }
    }
}

impl From<&IdentityConfig> for Identity {
    fn from(cfg: &IdentityConfig) -> Self {
        Identity::builder(cfg.id.clone())
            .roles(cfg.roles.clone())
            .details(cfg.details.clone())
            .build()
    }
}

/// Maps a static token to a specific identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenMapping {
    /// The bearer token value to match.
    pub token: String,
    /// The identity to return when this token is presented.
    pub identity: IdentityConfig,
    /// Instant after which the token is no longer accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}
