#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Session `AuthN` Plugin
//!
//! Authenticates requests by the session cookie they carry. Sessions are
//! opened by a form login checked against a [`authn_sdk::UserRepository`]
//! and kept in a [`SessionStore`].
//!
//! Rejected browser requests (`Accept: text/html`) are redirected to the
//! login page; every other client receives `401`.
//!
//! ## Configuration
//!
//! ```yaml
//! adapter:
//!   type: session
//!   cookie_name: "authgate_session"
//!   login_url: "/login"
//!   username_field: "username"
//!   password_field: "password"
//!   session_ttl_secs: 3600
//!   secure_cookie: true
//! ```

pub mod config;
pub mod domain;

pub use config::SessionAuthnPluginConfig;
pub use domain::{InMemorySessionStore, LoginOutcome, SessionAuthenticator, SessionStore};
