//! `AuthN` module wiring.

use std::sync::Arc;

use anyhow::Context;
use authn_sdk::{Authenticator, UserRepository};
use axum::Router;
use basic_authn_plugin::BasicAuthenticator;
use bearer_authn_plugin::BearerAuthenticator;
use session_authn_plugin::{InMemorySessionStore, SessionAuthenticator};
use tracing::info;

use crate::api::{AuthState, RoutePolicy, authn_middleware};
use crate::config::{AdapterConfig, AuthnConfig, UserSourceConfig};
use crate::domain::AuthGate;
use crate::infra::{HtpasswdUserRepository, InMemoryUserRepository};

/// `AuthN` module.
///
/// Owns the authenticator selected by configuration, the [`AuthGate`]
/// wrapping it and the public route table. For the session adapter it also
/// keeps the concrete [`SessionAuthenticator`] so the host can mount the
/// login and logout endpoints.
#[derive(Clone)]
pub struct AuthnModule {
    gate: Arc<AuthGate>,
    policy: RoutePolicy,
    session: Option<Arc<SessionAuthenticator>>,
}

impl AuthnModule {
    /// Build the module from configuration.
    ///
    /// # Errors
    ///
    /// Fails if the user source cannot be loaded or a public route is
    /// invalid.
    #[tracing::instrument(skip_all, fields(adapter = cfg.adapter.kind()))]
    pub fn from_config(cfg: &AuthnConfig) -> anyhow::Result<Self> {
        info!(adapter = cfg.adapter.kind(), "Initializing authn");

        let (authenticator, session) = build_adapter(cfg)?;
        let module = Self::assemble(authenticator, session, cfg)?;

        info!(
            public_routes = cfg.public_routes.len(),
            policy = ?cfg.on_collaborator_error,
            "AuthN ready"
        );
        Ok(module)
    }

    /// Build the module around a caller-supplied authenticator; the
    /// `adapter` and `users` sections of `cfg` are ignored.
    ///
    /// # Errors
    ///
    /// Fails if a public route is invalid.
    pub fn with_authenticator(
        authenticator: Arc<dyn Authenticator>,
        cfg: &AuthnConfig,
    ) -> anyhow::Result<Self> {
        Self::assemble(authenticator, None, cfg)
    }

    fn assemble(
        authenticator: Arc<dyn Authenticator>,
        session: Option<Arc<SessionAuthenticator>>,
        cfg: &AuthnConfig,
    ) -> anyhow::Result<Self> {
        let policy = RoutePolicy::from_public_routes(&cfg.public_routes)?;
        Ok(Self {
            gate: Arc::new(AuthGate::new(authenticator, cfg.on_collaborator_error)),
            policy,
            session,
        })
    }

    #[must_use]
    pub fn gate(&self) -> &Arc<AuthGate> {
        &self.gate
    }

    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        AuthState {
            gate: Arc::clone(&self.gate),
            policy: self.policy.clone(),
        }
    }

    /// The session authenticator when the session adapter is active.
    #[must_use]
    pub fn session(&self) -> Option<&Arc<SessionAuthenticator>> {
        self.session.as_ref()
    }

    /// Guard every route of `router` with [`authn_middleware`].
    #[must_use]
    pub fn protect<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(axum::middleware::from_fn_with_state(
            self.auth_state(),
            authn_middleware,
        ))
    }
}

/// Build the authenticator selected by `cfg.adapter`.
///
/// # Errors
///
/// Fails if the user source required by the adapter cannot be loaded.
pub fn build_authenticator(cfg: &AuthnConfig) -> anyhow::Result<Arc<dyn Authenticator>> {
    build_adapter(cfg).map(|(authenticator, _)| authenticator)
}

/// Build the user repository described by `source`.
///
/// # Errors
///
/// Fails on unreadable files, malformed entries and non-bcrypt hashes.
pub fn build_user_repository(source: &UserSourceConfig) -> anyhow::Result<Arc<dyn UserRepository>> {
    let repo: Arc<dyn UserRepository> = match source {
        UserSourceConfig::Inline { users } => {
            if users.is_empty() {
                tracing::warn!("No inline users configured, every login will be rejected");
            }
            Arc::new(
                InMemoryUserRepository::from_config(users)
                    .context("invalid inline user configuration")?,
            )
        }
        UserSourceConfig::Htpasswd { path, roles } => Arc::new(
            HtpasswdUserRepository::load(path, roles)
                .with_context(|| format!("failed to load htpasswd file '{}'", path.display()))?,
        ),
    };
    Ok(repo)
}

fn build_adapter(
    cfg: &AuthnConfig,
) -> anyhow::Result<(Arc<dyn Authenticator>, Option<Arc<SessionAuthenticator>>)> {
    match &cfg.adapter {
        AdapterConfig::Bearer(bearer) => {
            let authenticator: Arc<dyn Authenticator> =
                Arc::new(BearerAuthenticator::from_config(bearer));
            Ok((authenticator, None))
        }
        AdapterConfig::Basic(basic) => {
            let users = build_user_repository(&cfg.users)?;
            let authenticator: Arc<dyn Authenticator> =
                Arc::new(BasicAuthenticator::new(basic, users));
            Ok((authenticator, None))
        }
        AdapterConfig::Session(session_cfg) => {
            let users = build_user_repository(&cfg.users)?;
            let store = Arc::new(InMemorySessionStore::new());
            let session = Arc::new(SessionAuthenticator::new(session_cfg, store, users));
            let authenticator: Arc<dyn Authenticator> = session.clone();
            Ok((authenticator, Some(session)))
        }
    }
}
