//! `Authenticator` implementation for the basic plugin.

use async_trait::async_trait;
use authgate_http::{AuthRequest, AuthResponse, Problem};
use authn_sdk::{Authenticator, AuthnError, Identity};
use http::{StatusCode, header};

use super::service::{BasicAuthenticator, BasicCredentials};

#[async_trait]
impl Authenticator for BasicAuthenticator {
    async fn authenticate(&self, request: &AuthRequest) -> Result<Option<Identity>, AuthnError> {
        let Some(credentials) = BasicCredentials::from_request(request) else {
            tracing::debug!(path = request.path(), "Missing or malformed basic credentials");
            return Ok(None);
        };

        let identity = self
            .users
            .authenticate(&credentials.username, &credentials.password)
            .await?;
        if identity.is_none() {
            tracing::debug!(username = %credentials.username, "Basic credentials rejected");
        }
        Ok(identity)
    }

    fn unauthorized_response(&self, _request: &AuthRequest) -> AuthResponse {
        AuthResponse::from(Problem::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Valid credentials are required",
        ))
        .with_header(header::WWW_AUTHENTICATE, self.challenge())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use authn_sdk::UserRepository;
    use http::HeaderValue;
    use secrecy::{ExposeSecret, SecretString};

    use super::*;
    use crate::config::BasicAuthnPluginConfig;

    /// Plain-text user table, good enough to exercise the authenticator.
    struct TableUsers(HashMap<&'static str, &'static str>);

    #[async_trait]
    impl UserRepository for TableUsers {
        async fn authenticate(
            &self,
            credential: &str,
            password: &SecretString,
        ) -> Result<Option<Identity>, AuthnError> {
            Ok(self
                .0
                .get(credential)
                .filter(|pw| **pw == password.expose_secret())
                .map(|_| Identity::builder(credential).role("user").build()))
        }

        async fn user_roles(&self, identity: &str) -> Result<Vec<String>, AuthnError> {
            Ok(if self.0.contains_key(identity) {
                vec!["user".to_owned()]
            } else {
                Vec::new()
            })
        }
    }

    struct DownUsers;

    #[async_trait]
    impl UserRepository for DownUsers {
        async fn authenticate(
            &self,
            _credential: &str,
            _password: &SecretString,
        ) -> Result<Option<Identity>, AuthnError> {
            Err(AuthnError::Unavailable("user database unreachable".to_owned()))
        }

        async fn user_roles(&self, _identity: &str) -> Result<Vec<String>, AuthnError> {
            Err(AuthnError::Unavailable("user database unreachable".to_owned()))
        }
    }

    fn authenticator() -> BasicAuthenticator {
        BasicAuthenticator::new(
            &BasicAuthnPluginConfig::default(),
            Arc::new(TableUsers(HashMap::from([("alice", "pw")]))),
        )
    }

    fn basic(value: &'static str) -> AuthRequest {
        AuthRequest::builder()
            .header(header::AUTHORIZATION, HeaderValue::from_static(value))
            .build()
    }

    #[tokio::test]
    async fn valid_credentials_yield_identity() {
        // alice:pw
        let identity = authenticator()
            .authenticate(&basic("Basic YWxpY2U6cHc="))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(identity.id(), "alice");
        assert!(identity.has_role("user"));
    }

    #[tokio::test]
    async fn wrong_password_yields_none() {
        // alice:hunter2
        let result = authenticator()
            .authenticate(&basic("Basic YWxpY2U6aHVudGVyMg=="))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn missing_header_yields_none_and_basic_challenge() {
        let authn = authenticator();
        let request = AuthRequest::builder().build();

        assert!(authn.authenticate(&request).await.unwrap().is_none());

        let response = authn.unauthorized_response(&request);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.header(header::WWW_AUTHENTICATE),
            Some("Basic realm=\"authgate\"")
        );
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["status"], 401);
    }

    #[tokio::test]
    async fn repository_failure_is_propagated() {
        let authn = BasicAuthenticator::new(&BasicAuthnPluginConfig::default(), Arc::new(DownUsers));

        let result = authn.authenticate(&basic("Basic YWxpY2U6cHc=")).await;

        assert!(matches!(result, Err(AuthnError::Unavailable(_))));
    }

    #[tokio::test]
    async fn malformed_header_does_not_reach_repository() {
        // DownUsers would turn any lookup into an error.
        let authn = BasicAuthenticator::new(&BasicAuthnPluginConfig::default(), Arc::new(DownUsers));

        let result = authn.authenticate(&basic("Basic %%%")).await.unwrap();

        assert!(result.is_none());
    }
}
