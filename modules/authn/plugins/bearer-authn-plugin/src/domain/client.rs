//! `Authenticator` implementation for the bearer plugin.

use async_trait::async_trait;
use authgate_http::{AuthRequest, AuthResponse, Problem};
use authn_sdk::{Authenticator, AuthnError, Identity};
use http::{StatusCode, header};

use super::service::BearerAuthenticator;

#[async_trait]
impl Authenticator for BearerAuthenticator {
    async fn authenticate(&self, request: &AuthRequest) -> Result<Option<Identity>, AuthnError> {
        let Some(token) = request.authorization("Bearer").filter(|t| !t.is_empty()) else {
            tracing::debug!(path = request.path(), "No bearer token presented");
            return Ok(None);
        };

        let identity = self.verifier.verify(token).await?;
        if identity.is_none() {
            tracing::debug!(path = request.path(), "Bearer token rejected");
        }
        Ok(identity)
    }

    fn unauthorized_response(&self, _request: &AuthRequest) -> AuthResponse {
        AuthResponse::from(Problem::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "A valid bearer token is required",
        ))
        .with_header(header::WWW_AUTHENTICATE, self.challenge())
    }
}
