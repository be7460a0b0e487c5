//! Domain layer for the `AuthN` module.

pub mod error;
pub mod gate;

pub use error::{ConfigError, RepositoryError};
pub use gate::{Admission, AuthGate};
