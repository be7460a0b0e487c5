//! Credential store collaborator.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::AuthnError;
use crate::models::Identity;

/// Verifies username/password pairs against some user store.
///
/// Used by the basic and session variants. Implementations own their
/// storage, caching and pooling, and must be safe under concurrent use.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return the identity for `credential` if `password` matches.
    ///
    /// Unknown users and wrong passwords both yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// `Unavailable` if the store cannot be reached,
    /// `InvalidStoredCredential` if the stored hash cannot be used.
    async fn authenticate(
        &self,
        credential: &str,
        password: &SecretString,
    ) -> Result<Option<Identity>, AuthnError>;

    /// Roles assigned to a user; empty for unknown users.
    ///
    /// Extension point for hosts that authorize outside the authentication
    /// path (admin tooling, role refresh). The bundled authenticators take
    /// roles from the identity returned by [`UserRepository::authenticate`]
    /// and do not call it.
    ///
    /// # Errors
    ///
    /// `Unavailable` if the store cannot be reached.
    async fn user_roles(&self, identity: &str) -> Result<Vec<String>, AuthnError>;
}
