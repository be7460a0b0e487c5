//! Domain layer for the bearer `AuthN` plugin.

pub mod client;
pub mod service;
pub mod verifier;

pub use service::BearerAuthenticator;
pub use verifier::{StaticTokenVerifier, TokenVerifier};
