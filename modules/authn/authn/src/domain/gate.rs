//! Explicit admission decision for a request.

use std::sync::Arc;

use authgate_http::{AuthRequest, AuthResponse, Problem};
use authn_sdk::{Authenticator, AuthnError, Identity};
use http::StatusCode;

use crate::config::CollaboratorFailurePolicy;

/// Outcome of [`AuthGate::admit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The request carries valid credentials.
    Granted(Identity),
    /// The request must be answered with this response.
    Denied(AuthResponse),
}

impl Admission {
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Granted(identity) => Some(identity),
            Self::Denied(_) => None,
        }
    }
}

/// Runs the configured authenticator and turns its result into an
/// [`Admission`], applying the collaborator failure policy.
pub struct AuthGate {
    authenticator: Arc<dyn Authenticator>,
    on_collaborator_error: CollaboratorFailurePolicy,
}

impl AuthGate {
    #[must_use]
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        on_collaborator_error: CollaboratorFailurePolicy,
    ) -> Self {
        Self {
            authenticator,
            on_collaborator_error,
        }
    }

    #[must_use]
    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.authenticator
    }

    #[must_use]
    pub fn policy(&self) -> CollaboratorFailurePolicy {
        self.on_collaborator_error
    }

    /// Decide whether `request` may proceed.
    pub async fn admit(&self, request: &AuthRequest) -> Admission {
        match self.authenticator.authenticate(request).await {
            Ok(Some(identity)) => {
                tracing::debug!(identity = identity.id(), path = request.path(), "Request admitted");
                Admission::Granted(identity)
            }
            Ok(None) => Admission::Denied(self.authenticator.unauthorized_response(request)),
            Err(err) => {
                log_collaborator_error(&err);
                let response = match self.on_collaborator_error {
                    CollaboratorFailurePolicy::Reject => {
                        self.authenticator.unauthorized_response(request)
                    }
                    CollaboratorFailurePolicy::Fail => collaborator_error_response(&err),
                };
                Admission::Denied(response)
            }
        }
    }
}

/// RFC 9457 response for a collaborator failure. Internal detail stays in
/// the logs.
pub(crate) fn collaborator_error_response(err: &AuthnError) -> AuthResponse {
    let (status, title, detail) = match err {
        AuthnError::Unavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Service Unavailable",
            "Authentication service unavailable",
        ),
        AuthnError::InvalidStoredCredential(_) | AuthnError::Internal(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "Internal authentication error",
        ),
    };
    Problem::new(status, title, detail).into()
}

/// Cognitive complexity is inflated by tracing macro expansion.
#[allow(clippy::cognitive_complexity)]
pub(crate) fn log_collaborator_error(err: &AuthnError) {
    match err {
        AuthnError::Unavailable(msg) => {
            tracing::error!(error = %msg, "AuthN collaborator unavailable");
        }
        AuthnError::InvalidStoredCredential(msg) => {
            tracing::error!(error = %msg, "AuthN stored credential unusable");
        }
        AuthnError::Internal(msg) => tracing::error!(error = %msg, "AuthN internal error"),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use async_trait::async_trait;
    use http::{HeaderValue, header};
    use tracing_test::traced_test;

    use super::*;

    /// Accepts `Authorization: Test ok`, reports the store down for
    /// `Test down`.
    struct ScriptedAuthenticator;

    #[async_trait]
    impl Authenticator for ScriptedAuthenticator {
        async fn authenticate(
            &self,
            request: &AuthRequest,
        ) -> Result<Option<Identity>, AuthnError> {
            match request.authorization("Test") {
                Some("ok") => Ok(Some(Identity::new("user-42"))),
                Some("down") => Err(AuthnError::Unavailable("db-7 refused connection".to_owned())),
                Some("corrupt") => Err(AuthnError::InvalidStoredCredential("bad hash".to_owned())),
                _ => Ok(None),
            }
        }

        fn unauthorized_response(&self, _request: &AuthRequest) -> AuthResponse {
            AuthResponse::unauthorized()
                .with_header(header::WWW_AUTHENTICATE, HeaderValue::from_static("Test"))
        }
    }

    fn gate(policy: CollaboratorFailurePolicy) -> AuthGate {
        AuthGate::new(Arc::new(ScriptedAuthenticator), policy)
    }

    fn request(credentials: &'static str) -> AuthRequest {
        AuthRequest::builder()
            .header(header::AUTHORIZATION, HeaderValue::from_static(credentials))
            .build()
    }

    #[tokio::test]
    async fn valid_credentials_are_granted() {
        let admission = gate(CollaboratorFailurePolicy::Reject)
            .admit(&request("Test ok"))
            .await;

        assert_eq!(admission, Admission::Granted(Identity::new("user-42")));
        assert_eq!(admission.identity().map(Identity::id), Some("user-42"));
    }

    #[tokio::test]
    async fn missing_credentials_get_the_authenticator_response() {
        let admission = gate(CollaboratorFailurePolicy::Fail)
            .admit(&AuthRequest::builder().build())
            .await;

        let Admission::Denied(response) = admission else {
            panic!("expected denial");
        };
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.header(header::WWW_AUTHENTICATE), Some("Test"));
    }

    #[tokio::test]
    #[traced_test]
    async fn reject_policy_fails_closed() {
        let admission = gate(CollaboratorFailurePolicy::Reject)
            .admit(&request("Test down"))
            .await;

        let Admission::Denied(response) = admission else {
            panic!("expected denial");
        };
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(logs_contain("AuthN collaborator unavailable"));
        assert!(logs_contain("error=db-7 refused connection"));
        assert!(!logs_contain("unavailable: db-7"));
    }

    #[tokio::test]
    async fn fail_policy_maps_unavailable_to_503_without_detail() {
        let admission = gate(CollaboratorFailurePolicy::Fail)
            .admit(&request("Test down"))
            .await;

        let Admission::Denied(response) = admission else {
            panic!("expected denial");
        };
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = String::from_utf8(response.body().to_vec()).unwrap();
        assert!(!body.contains("db-7"));
    }

    #[tokio::test]
    async fn fail_policy_maps_bad_stored_credential_to_500() {
        let admission = gate(CollaboratorFailurePolicy::Fail)
            .admit(&request("Test corrupt"))
            .await;

        let Admission::Denied(response) = admission else {
            panic!("expected denial");
        };
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
