//! Basic authenticator and credential decoding.

use std::sync::Arc;

use authgate_http::{AuthRequest, challenge};
use authn_sdk::UserRepository;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::HeaderValue;
use secrecy::SecretString;

use crate::config::BasicAuthnPluginConfig;

/// Authenticates `Authorization: Basic` requests against a [`UserRepository`].
pub struct BasicAuthenticator {
    pub(crate) users: Arc<dyn UserRepository>,
    realm: String,
    challenge: HeaderValue,
}

impl BasicAuthenticator {
    #[must_use]
    pub fn new(cfg: &BasicAuthnPluginConfig, users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            realm: cfg.realm.clone(),
            challenge: challenge("Basic", Some(&cfg.realm)),
        }
    }

    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub(crate) fn challenge(&self) -> HeaderValue {
        self.challenge.clone()
    }
}

/// Username and password decoded from an `Authorization: Basic` header.
#[derive(Debug)]
pub struct BasicCredentials {
    pub username: String,
    pub password: SecretString,
}

impl BasicCredentials {
    /// Decode the credentials carried by `request`.
    ///
    /// Returns `None` when the header is missing, uses another scheme, is
    /// not valid base64/UTF-8, lacks the `:` separator, or names an empty
    /// user.
    #[must_use]
    pub fn from_request(request: &AuthRequest) -> Option<Self> {
        let encoded = request.authorization("Basic")?;
        let decoded = STANDARD.decode(encoded).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        if username.is_empty() {
            return None;
        }

        Some(Self {
            username: username.to_owned(),
            password: SecretString::from(password.to_owned()),
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use http::header;
    use secrecy::ExposeSecret;

    use super::*;

    fn request_with(value: &'static str) -> AuthRequest {
        AuthRequest::builder()
            .header(header::AUTHORIZATION, HeaderValue::from_static(value))
            .build()
    }

    #[test]
    fn decodes_username_and_password() {
        // alice:s3cr:et
        let creds = BasicCredentials::from_request(&request_with("Basic YWxpY2U6czNjcjpldA=="))
            .unwrap();

        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password.expose_secret(), "s3cr:et");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert!(BasicCredentials::from_request(&request_with("basic YWxpY2U6cHc=")).is_some());
    }

    #[test]
    fn malformed_values_are_rejected() {
        for value in [
            "Basic !!!not-base64",
            // "alice" (no separator)
            "Basic YWxpY2U=",
            // ":pw" (empty username)
            "Basic OnB3",
            "Bearer YWxpY2U6cHc=",
        ] {
            assert!(
                BasicCredentials::from_request(&request_with(value)).is_none(),
                "{value}"
            );
        }
    }

    #[test]
    fn debug_redacts_password() {
        let creds = BasicCredentials::from_request(&request_with("Basic YWxpY2U6aHVudGVyMg=="))
            .unwrap();

        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn challenge_carries_realm() {
        struct NoUsers;

        #[async_trait::async_trait]
        impl UserRepository for NoUsers {
            async fn authenticate(
                &self,
                _credential: &str,
                _password: &SecretString,
            ) -> Result<Option<authn_sdk::Identity>, authn_sdk::AuthnError> {
                Ok(None)
            }

            async fn user_roles(&self, _identity: &str) -> Result<Vec<String>, authn_sdk::AuthnError> {
                Ok(Vec::new())
            }
        }

        let authn = BasicAuthenticator::new(
            &BasicAuthnPluginConfig {
                realm: "staff".to_owned(),
            },
            Arc::new(NoUsers),
        );

        assert_eq!(authn.realm(), "staff");
        assert_eq!(authn.challenge(), "Basic realm=\"staff\"");

        let quoted = BasicAuthenticator::new(
            &BasicAuthnPluginConfig {
                realm: r#"a", error="x"#.to_owned(),
            },
            Arc::new(NoUsers),
        );
        assert_eq!(quoted.challenge(), r#"Basic realm="a\", error=\"x""#);
    }
}
