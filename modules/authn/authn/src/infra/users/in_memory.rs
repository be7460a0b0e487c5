use std::collections::HashMap;

use async_trait::async_trait;
use authn_sdk::{AuthnError, Identity, UserRepository};
use secrecy::SecretString;

use super::{is_bcrypt_hash, verify_password};
use crate::config::UserConfig;
use crate::domain::error::RepositoryError;

#[derive(Debug, Clone)]
struct StoredUser {
    password_hash: String,
    identity: Identity,
}

/// Users held in memory, keyed by user name.
///
/// Unknown user names are checked against a stored hash as well, so both
/// outcomes cost one bcrypt verification.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: HashMap<String, StoredUser>,
    decoy_hash: Option<String>,
}

impl InMemoryUserRepository {
    /// Build from inline configuration.
    ///
    /// # Errors
    ///
    /// Fails on non-bcrypt hashes and duplicate user names.
    pub fn from_config(users: &[UserConfig]) -> Result<Self, RepositoryError> {
        let mut repo = Self::default();
        for user in users {
            let identity = Identity::builder(user.username.clone())
                .roles(user.roles.clone())
                .details(user.details.clone())
                .build();
            repo.insert(identity, user.password_hash.clone())?;
        }
        Ok(repo)
    }

    /// Add a user whose id is the login name.
    ///
    /// # Errors
    ///
    /// Fails on non-bcrypt hashes and duplicate user names.
    pub fn insert(
        &mut self,
        identity: Identity,
        password_hash: String,
    ) -> Result<(), RepositoryError> {
        let username = identity.id().to_owned();
        if !is_bcrypt_hash(&password_hash) {
            return Err(RepositoryError::UnsupportedHash { username });
        }
        if self.users.contains_key(&username) {
            return Err(RepositoryError::DuplicateUser { username });
        }
        if self.decoy_hash.is_none() {
            self.decoy_hash = Some(password_hash.clone());
        }
        self.users.insert(
            username,
            StoredUser {
                password_hash,
                identity,
            },
        );
        Ok(())
    }

    /// Spend one verification on an unknown user and discard the outcome.
    async fn verify_decoy(&self, password: &SecretString) {
        let Some(hash) = self.decoy_hash.as_deref() else {
            return;
        };
        if let Err(error) = verify_password(password, hash).await {
            tracing::debug!(error = %error, "Decoy verification failed");
        }
        tracing::trace!("Verified decoy hash for unknown user");
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn authenticate(
        &self,
        credential: &str,
        password: &SecretString,
    ) -> Result<Option<Identity>, AuthnError> {
        let Some(user) = self.users.get(credential) else {
            self.verify_decoy(password).await;
            tracing::debug!(username = %credential, "Unknown user");
            return Ok(None);
        };

        if verify_password(password, &user.password_hash).await? {
            Ok(Some(user.identity.clone()))
        } else {
            tracing::debug!(username = %credential, "Password mismatch");
            Ok(None)
        }
    }

    async fn user_roles(&self, identity: &str) -> Result<Vec<String>, AuthnError> {
        Ok(self
            .users
            .get(identity)
            .map(|u| u.identity.roles().to_vec())
            .unwrap_or_default())
    }
}
