//! Login and logout endpoints for the session adapter.

use std::sync::Arc;

use authgate_http::{AuthRequest, Problem};
use axum::Router;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use http::StatusCode;
use session_authn_plugin::SessionAuthenticator;

use crate::domain::gate::{collaborator_error_response, log_collaborator_error};

const MAX_LOGIN_FORM_BYTES: usize = 16 * 1024;

/// `POST /login` and `POST /logout`.
///
/// Mount these outside the protected router so an unauthenticated client
/// can reach them.
#[must_use]
pub fn session_routes<S>(session: Arc<SessionAuthenticator>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .with_state(session)
}

/// Open a session from a url-encoded form; `200` with the identity and the
/// session cookie, `401` on rejected credentials.
pub async fn login_handler(
    State(session): State<Arc<SessionAuthenticator>>,
    req: Request,
) -> Response {
    let (parts, body) = req.into_parts();
    let Ok(body) = axum::body::to_bytes(body, MAX_LOGIN_FORM_BYTES).await else {
        return Problem::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "Payload Too Large",
            "Login form is too large",
        )
        .into_response();
    };
    let request = AuthRequest::from_parts(&parts, body);

    match session.login(&request).await {
        Ok(Some(outcome)) => outcome.into_response().into_response(),
        Ok(None) => Problem::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Invalid user name or password",
        )
        .into_response(),
        Err(err) => {
            log_collaborator_error(&err);
            collaborator_error_response(&err).into_response()
        }
    }
}

/// Close the current session and expire the cookie; `204`.
pub async fn logout_handler(
    State(session): State<Arc<SessionAuthenticator>>,
    req: Request,
) -> Response {
    match session.logout(&AuthRequest::from_head(&req)).await {
        Ok(response) => response.into_response(),
        Err(err) => {
            log_collaborator_error(&err);
            collaborator_error_response(&err).into_response()
        }
    }
}
