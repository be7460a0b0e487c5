//! axum integration: authentication middleware and identity extractor.

use std::sync::Arc;

use authgate_http::{AuthRequest, Problem};
use authn_sdk::Identity;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, Method, StatusCode, header};

use super::policy::{AuthRequirement, RoutePolicy};
use crate::domain::{Admission, AuthGate};

/// Shared state for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub gate: Arc<AuthGate>,
    pub policy: RoutePolicy,
}

/// Authentication middleware.
///
/// For each request:
/// 1. Skips CORS preflight requests
/// 2. Lets public routes through untouched
/// 3. Otherwise asks the [`AuthGate`] and either inserts the [`Identity`]
///    into the request extensions or answers with the denial response
///
/// Authenticators see the request head only; the body is left for the
/// handler.
pub async fn authn_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    if is_preflight_request(req.method(), req.headers()) {
        return next.run(req).await;
    }

    if state.policy.resolve(req.method(), req.uri().path()) == AuthRequirement::None {
        return next.run(req).await;
    }

    let auth_request = AuthRequest::from_head(&req);
    match state.gate.admit(&auth_request).await {
        Admission::Granted(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Admission::Denied(response) => response.into_response(),
    }
}

/// Extractor for the [`Identity`] inserted by [`authn_middleware`].
#[derive(Debug, Clone)]
pub struct Authenticated(pub Identity);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| {
                Problem::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "Identity not found - authn middleware not configured",
                )
            })
    }
}

/// Check if this is a CORS preflight request
///
/// Preflight requests are OPTIONS requests with:
/// - Origin header present
/// - Access-Control-Request-Method header present
fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn preflight_needs_options_origin_and_request_method() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static("https://app.example"));
        assert!(!is_preflight_request(&Method::OPTIONS, &headers));

        headers.insert(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("GET"),
        );
        assert!(is_preflight_request(&Method::OPTIONS, &headers));
        assert!(!is_preflight_request(&Method::GET, &headers));
    }

    #[tokio::test]
    async fn extractor_without_middleware_is_a_500() {
        let (mut parts, ()) = http::Request::new(()).into_parts();

        let rejection = Authenticated::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();

        assert_eq!(rejection.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn extractor_returns_inserted_identity() {
        let (mut parts, ()) = http::Request::new(()).into_parts();
        parts.extensions.insert(Identity::new("user-42"));

        let Authenticated(identity) = Authenticated::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(identity.id(), "user-42");
    }
}
