//! Development user repositories backed by bcrypt hashes.

mod htpasswd;
mod in_memory;

pub use htpasswd::HtpasswdUserRepository;
pub use in_memory::InMemoryUserRepository;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::error::RepositoryError;

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

pub(crate) fn is_bcrypt_hash(hash: &str) -> bool {
    BCRYPT_PREFIXES.iter().any(|p| hash.starts_with(p))
}

/// Check `password` against a bcrypt hash off the async executor.
pub(crate) async fn verify_password(
    password: &SecretString,
    hash: &str,
) -> Result<bool, RepositoryError> {
    let password = SecretString::from(password.expose_secret().to_owned());
    let hash = hash.to_owned();
    let verified =
        tokio::task::spawn_blocking(move || bcrypt::verify(password.expose_secret(), &hash))
            .await??;
    Ok(verified)
}
