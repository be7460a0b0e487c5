//! Bearer authenticator.

use std::sync::Arc;

use authgate_http::challenge;
use http::HeaderValue;

use super::verifier::{StaticTokenVerifier, TokenVerifier};
use crate::config::BearerAuthnPluginConfig;

/// Authenticates `Authorization: Bearer` requests through a [`TokenVerifier`].
pub struct BearerAuthenticator {
    pub(crate) verifier: Arc<dyn TokenVerifier>,
    challenge: HeaderValue,
}

impl BearerAuthenticator {
    #[must_use]
    pub fn new(cfg: &BearerAuthnPluginConfig, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            verifier,
            challenge: challenge("Bearer", cfg.realm.as_deref()),
        }
    }

    /// Authenticator backed by a [`StaticTokenVerifier`] built from `cfg`.
    #[must_use]
    pub fn from_config(cfg: &BearerAuthnPluginConfig) -> Self {
        Self::new(cfg, Arc::new(StaticTokenVerifier::from_config(cfg)))
    }

    pub(crate) fn challenge(&self) -> HeaderValue {
        self.challenge.clone()
    }
}
