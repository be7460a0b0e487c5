//! Domain errors for the `AuthN` module.

use std::path::PathBuf;

use authn_sdk::AuthnError;

/// Invalid module configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid public route '{route}': {reason}")]
    InvalidRoute { route: String, reason: String },
}

/// User repository failures.
#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("user '{username}' has an unsupported password hash (only bcrypt is accepted)")]
    UnsupportedHash { username: String },

    #[error("user '{username}' is defined more than once")]
    DuplicateUser { username: String },

    #[error("stored hash cannot be verified: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password verification task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<RepositoryError> for AuthnError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Hash(err) => Self::InvalidStoredCredential(err.to_string()),
            RepositoryError::UnsupportedHash { username } => {
                Self::InvalidStoredCredential(format!("unsupported hash for '{username}'"))
            }
            RepositoryError::Read { .. } => Self::Unavailable(e.to_string()),
            RepositoryError::MalformedLine { .. }
            | RepositoryError::DuplicateUser { .. }
            | RepositoryError::Task(_) => Self::Internal(e.to_string()),
        }
    }
}
