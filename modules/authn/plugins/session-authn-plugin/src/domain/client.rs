//! `Authenticator` implementation for the session plugin.

use async_trait::async_trait;
use authgate_http::{AuthRequest, AuthResponse, Problem};
use authn_sdk::{Authenticator, AuthnError, Identity};
use http::StatusCode;

use super::service::SessionAuthenticator;

#[async_trait]
impl Authenticator for SessionAuthenticator {
    async fn authenticate(&self, request: &AuthRequest) -> Result<Option<Identity>, AuthnError> {
        let Some(session_id) = self.session_id(request) else {
            tracing::debug!(path = request.path(), "No session cookie presented");
            return Ok(None);
        };

        let identity = self.store.load(session_id).await?;
        if identity.is_none() {
            tracing::debug!(path = request.path(), "Unknown or expired session");
        }
        Ok(identity)
    }

    fn unauthorized_response(&self, request: &AuthRequest) -> AuthResponse {
        if request.accepts("text/html") {
            if let Some(location) = self.login_location() {
                return AuthResponse::redirect(location);
            }
        }

        AuthResponse::from(Problem::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "A valid session is required",
        ))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Arc;

    use authn_sdk::UserRepository;
    use http::{HeaderValue, Method, header};
    use secrecy::{ExposeSecret, SecretString};

    use super::*;
    use crate::config::SessionAuthnPluginConfig;
    use crate::domain::{InMemorySessionStore, SessionStore};

    struct SingleUser;

    #[async_trait]
    impl UserRepository for SingleUser {
        async fn authenticate(
            &self,
            credential: &str,
            password: &SecretString,
        ) -> Result<Option<Identity>, AuthnError> {
            Ok((credential == "alice" && password.expose_secret() == "pw")
                .then(|| Identity::builder("alice").role("admin").build()))
        }

        async fn user_roles(&self, _identity: &str) -> Result<Vec<String>, AuthnError> {
            Ok(vec!["admin".to_owned()])
        }
    }

    fn authenticator(store: Arc<InMemorySessionStore>) -> SessionAuthenticator {
        let cfg = SessionAuthnPluginConfig {
            secure_cookie: false,
            ..SessionAuthnPluginConfig::default()
        };
        SessionAuthenticator::new(&cfg, store, Arc::new(SingleUser))
    }

    fn login_request(body: &'static str) -> AuthRequest {
        AuthRequest::builder()
            .method(Method::POST)
            .uri(http::Uri::from_static("/login"))
            .header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .body(body)
            .build()
    }

    fn with_cookie(cookie: &str) -> AuthRequest {
        AuthRequest::builder()
            .header(header::COOKIE, HeaderValue::from_str(cookie).unwrap())
            .build()
    }

    /// `name=value` part of a `Set-Cookie` header.
    fn cookie_pair(set_cookie: &HeaderValue) -> String {
        set_cookie
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_owned()
    }

    #[tokio::test]
    async fn login_then_authenticate_with_cookie() {
        let store = Arc::new(InMemorySessionStore::new());
        let authn = authenticator(Arc::clone(&store));

        let outcome = authn
            .login(&login_request("username=alice&password=pw"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome.identity().id(), "alice");
        assert_eq!(store.len(), 1);

        let set_cookie = outcome.set_cookie().to_str().unwrap();
        assert!(set_cookie.starts_with("authgate_session="));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(!set_cookie.contains("Secure"));

        let request = with_cookie(&cookie_pair(outcome.set_cookie()));
        let identity = authn.authenticate(&request).await.unwrap().unwrap();
        assert!(identity.has_role("admin"));
    }

    #[tokio::test]
    async fn login_response_carries_identity_and_cookie() {
        let authn = authenticator(Arc::new(InMemorySessionStore::new()));
        let outcome = authn
            .login(&login_request("username=alice&password=pw"))
            .await
            .unwrap()
            .unwrap();
        let cookie = outcome.set_cookie().clone();

        let response = outcome.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.header(header::SET_COOKIE),
            cookie.to_str().ok()
        );
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["id"], "alice");
        assert_eq!(body["roles"][0], "admin");
    }

    #[tokio::test]
    async fn login_with_wrong_password_opens_no_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let authn = authenticator(Arc::clone(&store));

        let outcome = authn
            .login(&login_request("username=alice&password=nope"))
            .await
            .unwrap();

        assert!(outcome.is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn login_with_incomplete_form_is_rejected() {
        let authn = authenticator(Arc::new(InMemorySessionStore::new()));

        for body in ["username=alice", "password=pw", "username=&password=pw", ""] {
            assert!(
                authn.login(&login_request(body)).await.unwrap().is_none(),
                "{body}"
            );
        }
    }

    #[tokio::test]
    async fn unknown_session_cookie_yields_none() {
        let authn = authenticator(Arc::new(InMemorySessionStore::new()));

        let result = authn
            .authenticate(&with_cookie("authgate_session=forged"))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn logout_removes_session_and_expires_cookie() {
        let store = Arc::new(InMemorySessionStore::new());
        let authn = authenticator(Arc::clone(&store));
        let outcome = authn
            .login(&login_request("username=alice&password=pw"))
            .await
            .unwrap()
            .unwrap();
        let request = with_cookie(&cookie_pair(outcome.set_cookie()));

        let response = authn.logout(&request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.header(header::SET_COOKIE).unwrap().contains("Max-Age=0"));
        assert!(store.is_empty());
        assert!(authn.authenticate(&request).await.unwrap().is_none());
    }

    #[test]
    fn browser_is_redirected_to_login() {
        let authn = authenticator(Arc::new(InMemorySessionStore::new()));
        let request = AuthRequest::builder()
            .header(header::ACCEPT, HeaderValue::from_static("text/html"))
            .build();

        let response = authn.unauthorized_response(&request);

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.header(header::LOCATION), Some("/login"));
    }

    #[test]
    fn api_client_gets_401_without_challenge() {
        let authn = authenticator(Arc::new(InMemorySessionStore::new()));
        let request = AuthRequest::builder()
            .header(header::ACCEPT, HeaderValue::from_static("application/json"))
            .build();

        let response = authn.unauthorized_response(&request);

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.header(header::WWW_AUTHENTICATE).is_none());
        assert_eq!(response, authn.unauthorized_response(&request));
    }
}
