//! Immutable outbound response built by authenticators.

use axum::body::Body;
use axum::response::IntoResponse;
use bytes::Bytes;
use http::header::{self, AsHeaderName};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

use crate::problem::{PROBLEM_CONTENT_TYPE, Problem};

/// Response describing a rejected (or completed) authentication step.
///
/// Values are assembled with the consuming `with_*` methods and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl AuthResponse {
    /// Empty response with the given status.
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Bare `401 Unauthorized` without challenge or body.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED)
    }

    /// `302 Found` pointing at `location`.
    #[must_use]
    pub fn redirect(location: HeaderValue) -> Self {
        Self::new(StatusCode::FOUND).with_header(header::LOCATION, location)
    }

    /// JSON body with `200 OK`.
    ///
    /// Falls back to an empty body if the value cannot be serialized.
    #[must_use]
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        Self::new(StatusCode::OK).with_body(
            HeaderValue::from_static("application/json"),
            body,
        )
    }

    /// Replace the value of a header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_body(mut self, content_type: HeaderValue, body: impl Into<Bytes>) -> Self {
        self.headers.insert(header::CONTENT_TYPE, content_type);
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl From<Problem> for AuthResponse {
    fn from(problem: Problem) -> Self {
        let status = problem.status_code();
        // A four-field struct of strings always serializes.
        let body = serde_json::to_vec(&problem).unwrap_or_default();
        Self::new(status).with_body(HeaderValue::from_static(PROBLEM_CONTENT_TYPE), body)
    }
}

impl IntoResponse for AuthResponse {
    fn into_response(self) -> axum::response::Response {
        let mut response = axum::response::Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
