//! Error types for the authn module.

use thiserror::Error;

/// Failures of the collaborators an authenticator depends on.
///
/// Invalid or missing credentials are *not* errors; they surface as
/// `Ok(None)` from [`crate::Authenticator::authenticate`].
#[derive(Debug, Error)]
pub enum AuthnError {
    /// A collaborator (identity store, session store) could not be reached.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    /// A stored credential could not be interpreted.
    #[error("invalid stored credential: {0}")]
    InvalidStoredCredential(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
