//! Token verification collaborator and its static implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use authn_sdk::{AuthnError, Identity};
use chrono::{DateTime, Utc};

use crate::config::{BearerAuthnPluginConfig, TokenMode};

/// Turns a raw bearer token into an identity.
///
/// Signature checks, introspection calls and token caches live behind this
/// trait.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify `token` (without the `Bearer ` prefix).
    ///
    /// Unknown, expired or malformed tokens yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// `Unavailable` if the verification backend cannot be reached.
    async fn verify(&self, token: &str) -> Result<Option<Identity>, AuthnError>;
}

struct TokenEntry {
    identity: Identity,
    expires_at: Option<DateTime<Utc>>,
}

/// Configuration-backed verifier.
///
/// - `accept_all`: Any non-empty token maps to the default identity
/// - `static_tokens`: Specific tokens map to specific identities until they expire
pub struct StaticTokenVerifier {
    mode: TokenMode,
    default_identity: Identity,
    tokens: HashMap<String, TokenEntry>,
}

impl StaticTokenVerifier {
    /// Create a verifier from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &BearerAuthnPluginConfig) -> Self {
        if cfg.mode == TokenMode::AcceptAll {
            tracing::warn!(
                "Bearer AuthN verifier is running in `accept_all` mode: \
                 every non-empty token is accepted with a fixed identity. \
                 Do NOT use this mode in production."
            );
        }

        let tokens = cfg
            .tokens
            .iter()
            .map(|m| {
                let entry = TokenEntry {
                    identity: Identity::from(&m.identity),
                    expires_at: m.expires_at,
                };
                (m.token.clone(), entry)
            })
            .collect();

        Self {
            mode: cfg.mode,
            default_identity: Identity::from(&cfg.default_identity),
            tokens,
        }
    }

    /// Verify `token` as of `now`.
    #[must_use]
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<Identity> {
        if token.is_empty() {
            return None;
        }

        match self.mode {
            TokenMode::AcceptAll => Some(self.default_identity.clone()),
            TokenMode::StaticTokens => {
                let entry = self.tokens.get(token)?;
                if entry.expires_at.is_some_and(|exp| exp <= now) {
                    tracing::debug!(identity = entry.identity.id(), "Bearer token expired");
                    return None;
                }
                Some(entry.identity.clone())
            }
        }
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Option<Identity>, AuthnError> {
        Ok(self.verify_at(token, Utc::now()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::config::{IdentityConfig, TokenMapping};

    fn mapping(token: &str, id: &str, expires_at: Option<DateTime<Utc>>) -> TokenMapping {
        TokenMapping {
            token: token.to_owned(),
            identity: IdentityConfig {
                id: id.to_owned(),
                ..IdentityConfig::default()
            },
            expires_at,
        }
    }

    #[test]
    fn static_tokens_mode_returns_mapped_identity() {
        let cfg = BearerAuthnPluginConfig {
            tokens: vec![mapping("token-a", "user-a", None)],
            ..BearerAuthnPluginConfig::default()
        };
        let verifier = StaticTokenVerifier::from_config(&cfg);

        let identity = verifier.verify_at("token-a", Utc::now()).unwrap();
        assert_eq!(identity.id(), "user-a");
    }

    #[test]
    fn static_tokens_mode_rejects_unknown_token() {
        let cfg = BearerAuthnPluginConfig {
            tokens: vec![mapping("known", "user-a", None)],
            ..BearerAuthnPluginConfig::default()
        };
        let verifier = StaticTokenVerifier::from_config(&cfg);

        assert!(verifier.verify_at("unknown", Utc::now()).is_none());
    }

    #[test]
    fn expiry_is_exclusive_of_the_deadline() {
        let deadline = Utc::now();
        let cfg = BearerAuthnPluginConfig {
            tokens: vec![mapping("t", "user-a", Some(deadline))],
            ..BearerAuthnPluginConfig::default()
        };
        let verifier = StaticTokenVerifier::from_config(&cfg);

        assert!(
            verifier
                .verify_at("t", deadline - TimeDelta::seconds(1))
                .is_some()
        );
        assert!(verifier.verify_at("t", deadline).is_none());
    }

    #[test]
    fn accept_all_mode_returns_default_identity() {
        let cfg = BearerAuthnPluginConfig {
            mode: TokenMode::AcceptAll,
            ..BearerAuthnPluginConfig::default()
        };
        let verifier = StaticTokenVerifier::from_config(&cfg);

        let identity = verifier.verify_at("anything", Utc::now()).unwrap();
        assert_eq!(identity.id(), "dev-user");
    }

    #[test]
    fn empty_token_is_rejected_in_every_mode() {
        for mode in [TokenMode::AcceptAll, TokenMode::StaticTokens] {
            let cfg = BearerAuthnPluginConfig {
                mode,
                tokens: vec![mapping("", "ghost", None)],
                ..BearerAuthnPluginConfig::default()
            };
            let verifier = StaticTokenVerifier::from_config(&cfg);

            assert!(verifier.verify_at("", Utc::now()).is_none(), "{mode:?}");
        }
    }
}
