//! Domain layer for the session `AuthN` plugin.

pub mod client;
pub mod service;
pub mod store;

pub use service::{LoginOutcome, SessionAuthenticator};
pub use store::{InMemorySessionStore, SessionRecord, SessionStore};
