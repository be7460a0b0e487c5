#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Basic `AuthN` Plugin
//!
//! Authenticates `Authorization: Basic <base64(user:password)>` requests
//! against a [`authn_sdk::UserRepository`] and challenges rejected requests
//! with `WWW-Authenticate: Basic realm="..."`.
//!
//! ## Configuration
//!
//! ```yaml
//! adapter:
//!   type: basic
//!   realm: "authgate"
//! ```

pub mod config;
pub mod domain;

pub use config::BasicAuthnPluginConfig;
pub use domain::{BasicAuthenticator, BasicCredentials};
