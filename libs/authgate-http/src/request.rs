//! Immutable snapshot of an inbound HTTP request.

use bytes::Bytes;
use http::header::{self, AsHeaderName};
use http::request::Parts;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri};

/// Inbound request as seen by an authenticator.
///
/// Fields are private and only exposed through getters, so holding an
/// `&AuthRequest` is enough to guarantee the request is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

impl AuthRequest {
    /// Create a new `AuthRequest` builder
    #[must_use]
    pub fn builder() -> AuthRequestBuilder {
        AuthRequestBuilder::default()
    }

    /// Snapshot request parts together with an already collected body.
    #[must_use]
    pub fn from_parts(parts: &Parts, body: Bytes) -> Self {
        Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
            body,
        }
    }

    /// Snapshot the head of a request, leaving its body untouched.
    ///
    /// The snapshot carries an empty body. Use [`AuthRequest::from_parts`]
    /// when the authenticator needs to read form data.
    #[must_use]
    pub fn from_head<B>(request: &http::Request<B>) -> Self {
        Self {
            method: request.method().clone(),
            uri: request.uri().clone(),
            headers: request.headers().clone(),
            body: Bytes::new(),
        }
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// First value of a header, if present and valid visible ASCII.
    #[must_use]
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// All values of a header that are valid visible ASCII.
    #[must_use]
    pub fn header_all<K: AsHeaderName>(&self, name: K) -> impl Iterator<Item = &str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
    }

    /// Credentials of the `Authorization` header for the given scheme.
    ///
    /// The scheme comparison is case-insensitive and the returned
    /// credentials are trimmed. Returns `None` when the header is missing
    /// or uses a different scheme.
    #[must_use]
    pub fn authorization(&self, scheme: &str) -> Option<&str> {
        let value = self.header(header::AUTHORIZATION)?.trim_start();
        let (found, credentials) = value.split_once(' ')?;
        found
            .eq_ignore_ascii_case(scheme)
            .then(|| credentials.trim())
    }

    /// Value of a cookie sent in any `Cookie` header.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.header_all(header::COOKIE)
            .flat_map(|h| h.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.trim_matches('"'))
    }

    /// Whether the `Accept` header lists the media type explicitly.
    ///
    /// Wildcards such as `*/*` do not count, so API clients that accept
    /// anything are not mistaken for browsers. A range refused with `q=0`
    /// does not count either.
    #[must_use]
    pub fn accepts(&self, media_type: &str) -> bool {
        self.header_all(header::ACCEPT)
            .flat_map(|h| h.split(','))
            .filter_map(|item| {
                let mut params = item.split(';');
                let range = params.next()?.trim();
                let refused = params
                    .filter_map(|param| param.split_once('='))
                    .any(|(name, value)| {
                        name.trim().eq_ignore_ascii_case("q") && is_zero_quality(value.trim())
                    });
                (!refused).then_some(range)
            })
            .any(|range| range.eq_ignore_ascii_case(media_type))
    }
}

/// `q=0`, `q=0.`, `q=0.0` .. `q=0.000`.
fn is_zero_quality(value: &str) -> bool {
    value.strip_prefix('0').is_some_and(|rest| {
        rest.is_empty()
            || rest
                .strip_prefix('.')
                .is_some_and(|digits| digits.chars().all(|c| c == '0'))
    })
}

#[derive(Debug, Default)]
pub struct AuthRequestBuilder {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

impl AuthRequestBuilder {
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = uri;
        self
    }

    /// Append a header value; repeated names keep every value.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn build(self) -> AuthRequest {
        AuthRequest {
            method: self.method,
            uri: self.uri,
            headers: self.headers,
            body: self.body,
        }
    }
}
