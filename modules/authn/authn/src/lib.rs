//! `AuthN` Module
//!
//! Selects one authenticator (basic, bearer or session) from configuration
//! and puts it in front of an axum router.
//!
//! Two ways to consume the result of authentication:
//! - [`AuthGate::admit`] returns an [`Admission`] that the caller threads to
//!   downstream stages explicitly;
//! - [`authn_middleware`] does the same for an axum router and hands the
//!   [`authn_sdk::Identity`] to handlers through the [`Authenticated`]
//!   extractor.
//!
//! Collaborator failures are fail-closed by default
//! ([`CollaboratorFailurePolicy::Reject`]).
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use api::{
    AuthRequirement, AuthState, Authenticated, RoutePolicy, authn_middleware, session_routes,
};
pub use config::{AdapterConfig, AuthnConfig, CollaboratorFailurePolicy, UserConfig, UserSourceConfig};
pub use domain::{Admission, AuthGate, ConfigError, RepositoryError};
pub use infra::{HtpasswdUserRepository, InMemoryUserRepository};
pub use module::{AuthnModule, build_authenticator, build_user_repository};
