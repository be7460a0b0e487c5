//! Configuration for the session `AuthN` plugin.

use serde::{Deserialize, Serialize};

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionAuthnPluginConfig {
    /// Name of the cookie carrying the session id.
    pub cookie_name: String,

    /// Where rejected browser requests are redirected.
    pub login_url: String,

    /// Form field holding the user name on login.
    pub username_field: String,

    /// Form field holding the password on login.
    pub password_field: String,

    /// Session lifetime in seconds. Capped at one year.
    pub session_ttl_secs: u64,

    /// Add the `Secure` attribute to the session cookie.
    pub secure_cookie: bool,
}

impl Default for SessionAuthnPluginConfig {
    fn default() -> Self {
        Self {
            cookie_name: "authgate_session".to_owned(),
            login_url: "/login".to_owned(),
            username_field: "username".to_owned(),
            password_field: "password".to_owned(),
            session_ttl_secs: 3600,
            secure_cookie: true,
        }
    }
}
