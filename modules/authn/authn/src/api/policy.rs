//! Which routes skip authentication.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;

use crate::domain::error::ConfigError;

/// Whether a route requires authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    /// No authentication required (public route).
    None,
    /// Authentication required.
    Required,
}

/// Path pattern matcher.
#[derive(Clone, Default)]
struct RouteMatcher {
    matcher: matchit::Router<()>,
}

impl RouteMatcher {
    fn insert(&mut self, path: &str) -> Result<(), matchit::InsertError> {
        self.matcher.insert(path, ())
    }

    fn find(&self, path: &str) -> bool {
        self.matcher.at(path).is_ok()
    }
}

/// Public route table. Every route not listed here requires authentication.
#[derive(Clone, Default)]
pub struct RoutePolicy {
    by_method: Arc<HashMap<Method, RouteMatcher>>,
    any_method: Arc<RouteMatcher>,
}

impl RoutePolicy {
    /// Build from `"[METHOD ]path"` entries.
    ///
    /// # Errors
    ///
    /// Fails on unknown methods, patterns matchit rejects and duplicates.
    pub fn from_public_routes(routes: &[String]) -> Result<Self, ConfigError> {
        let mut by_method: HashMap<Method, RouteMatcher> = HashMap::new();
        let mut any_method = RouteMatcher::default();

        for route in routes {
            let invalid = |reason: String| ConfigError::InvalidRoute {
                route: route.clone(),
                reason,
            };

            let (method, path) = match route.trim().split_once(char::is_whitespace) {
                Some((method, path)) => {
                    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                        .map_err(|e| invalid(e.to_string()))?;
                    (Some(method), path.trim())
                }
                None => (None, route.trim()),
            };
            if !path.starts_with('/') {
                return Err(invalid("path must start with '/'".to_owned()));
            }

            let matcher = match method {
                Some(method) => by_method.entry(method).or_default(),
                None => &mut any_method,
            };
            // Axum-style `:param` segments are converted to matchit `{param}`
            matcher
                .insert(&convert_axum_path_to_matchit(path))
                .map_err(|e| invalid(e.to_string()))?;
        }

        Ok(Self {
            by_method: Arc::new(by_method),
            any_method: Arc::new(any_method),
        })
    }

    /// Resolve the authentication requirement for a given (method, path).
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> AuthRequirement {
        let is_public = self.any_method.find(path)
            || self
                .by_method
                .get(method)
                .is_some_and(|matcher| matcher.find(path));

        if is_public {
            AuthRequirement::None
        } else {
            AuthRequirement::Required
        }
    }
}

/// Convert Axum path syntax `:param` to matchit syntax `{param}`.
fn convert_axum_path_to_matchit(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ':' {
            result.push('{');
            while matches!(chars.peek(), Some(c) if c.is_alphanumeric() || *c == '_') {
                if let Some(c) = chars.next() {
                    result.push(c);
                }
            }
            result.push('}');
        } else {
            result.push(ch);
        }
    }

    result
}
