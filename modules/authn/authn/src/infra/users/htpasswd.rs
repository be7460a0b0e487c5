use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use authn_sdk::{AuthnError, Identity, UserRepository};
use secrecy::SecretString;

use super::InMemoryUserRepository;
use crate::domain::error::RepositoryError;

/// Users loaded once from an Apache htpasswd file.
///
/// Only bcrypt entries are accepted; MD5 (`$apr1$`), SHA1 and crypt
/// entries fail the load. Roles come from configuration since the file
/// format has no place for them.
#[derive(Debug, Clone)]
pub struct HtpasswdUserRepository {
    path: PathBuf,
    users: InMemoryUserRepository,
}

impl HtpasswdUserRepository {
    /// Read and parse `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or any entry is invalid.
    pub fn load(
        path: impl AsRef<Path>,
        roles: &BTreeMap<String, Vec<String>>,
    ) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|source| RepositoryError::Read {
            path: path.clone(),
            source,
        })?;
        let users = Self::parse(&content, roles)?;
        tracing::info!(path = %path.display(), users = users.len(), "Loaded htpasswd users");
        Ok(Self { path, users })
    }

    /// Parse htpasswd content. Blank lines and `#` comments are skipped.
    ///
    /// # Errors
    ///
    /// Fails on lines without `user:hash`, non-bcrypt hashes and duplicate
    /// user names.
    pub fn parse(
        content: &str,
        roles: &BTreeMap<String, Vec<String>>,
    ) -> Result<InMemoryUserRepository, RepositoryError> {
        let mut users = InMemoryUserRepository::default();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((username, hash)) = line.split_once(':') else {
                return Err(RepositoryError::MalformedLine {
                    line: idx + 1,
                    reason: "expected 'user:hash'".to_owned(),
                });
            };
            if username.is_empty() || hash.is_empty() {
                return Err(RepositoryError::MalformedLine {
                    line: idx + 1,
                    reason: "empty user name or hash".to_owned(),
                });
            }

            let identity = Identity::builder(username)
                .roles(roles.get(username).cloned().unwrap_or_default())
                .build();
            users.insert(identity, hash.to_owned())?;
        }

        Ok(users)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl UserRepository for HtpasswdUserRepository {
    async fn authenticate(
        &self,
        credential: &str,
        password: &SecretString,
    ) -> Result<Option<Identity>, AuthnError> {
        self.users.authenticate(credential, password).await
    }

    async fn user_roles(&self, identity: &str) -> Result<Vec<String>, AuthnError> {
        self.users.user_roles(identity).await
    }
}
