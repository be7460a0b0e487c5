//! Infrastructure adapters for the `AuthN` module.

pub mod users;

pub use users::{HtpasswdUserRepository, InMemoryUserRepository};
