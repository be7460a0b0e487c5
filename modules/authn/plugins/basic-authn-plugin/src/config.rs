//! Configuration for the basic `AuthN` plugin.

use serde::{Deserialize, Serialize};

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BasicAuthnPluginConfig {
    /// Realm advertised in the `WWW-Authenticate` challenge.
    pub realm: String,
}

impl Default for BasicAuthnPluginConfig {
    fn default() -> Self {
        Self {
            realm: "authgate".to_owned(),
        }
    }
}
