//! Domain layer for the basic `AuthN` plugin.

pub mod client;
pub mod service;

pub use service::{BasicAuthenticator, BasicCredentials};
