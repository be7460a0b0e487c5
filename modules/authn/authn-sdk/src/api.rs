//! The authenticator capability.
//!
//! Basic, bearer and session variants implement this trait. The hosting
//! pipeline selects one through configuration and calls it through
//! `Arc<dyn Authenticator>`.

use async_trait::async_trait;
use authgate_http::{AuthRequest, AuthResponse};

use crate::error::AuthnError;
use crate::models::Identity;

/// Decides whether a request is authenticated and, if not, how to say so.
///
/// Implementations must be safe to share between concurrently running
/// requests: they receive the request by shared reference and keep no
/// per-call mutable state.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticate the request and return the identity it carries.
    ///
    /// Missing or invalid credentials are a normal outcome and yield
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Only when a collaborator fails (identity store unreachable, stored
    /// credential malformed). Callers decide how to treat the failure; the
    /// pipeline in the `authn` crate fails closed by default.
    async fn authenticate(&self, request: &AuthRequest) -> Result<Option<Identity>, AuthnError>;

    /// Build the response that rejects `request`.
    ///
    /// The request is only read to tailor the response (challenge scheme,
    /// redirect vs. status code). Calling this twice on the same request
    /// yields equal responses.
    fn unauthorized_response(&self, request: &AuthRequest) -> AuthResponse;
}
