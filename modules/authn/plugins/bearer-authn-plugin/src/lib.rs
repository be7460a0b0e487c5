#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Bearer `AuthN` Plugin
//!
//! Authenticates `Authorization: Bearer <token>` requests by handing the
//! token to a [`TokenVerifier`]. The cryptographic token scheme is not part
//! of this crate; production deployments plug in their own verifier.
//!
//! The bundled [`StaticTokenVerifier`] maps tokens to identities from
//! configuration, for development and tests.
//!
//! ## Modes
//!
//! - **`static_tokens`** (default): Maps specific tokens to specific identities,
//!   optionally with an expiry timestamp.
//!
//! - **`accept_all`**: Accepts any non-empty token and returns the configured
//!   default identity. Never use in production.
//!
//! ## Configuration
//!
//! ```yaml
//! adapter:
//!   type: bearer
//!   realm: "api"
//!   mode: static_tokens
//!   tokens:
//!     - token: "e2e-token-user-42"
//!       identity:
//!         id: "user-42"
//!         roles: ["reader"]
//!       expires_at: "2030-01-01T00:00:00Z"
//! ```

pub mod config;
pub mod domain;

pub use config::BearerAuthnPluginConfig;
pub use domain::{BearerAuthenticator, StaticTokenVerifier, TokenVerifier};
