//! HTTP routes of the demo host.

use std::sync::Arc;

use authn::{AuthnModule, Authenticated, session_routes};
use authn_sdk::Identity;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

/// Assemble the application router.
///
/// - `GET /health` is always public
/// - `GET /me` goes through the authn middleware
/// - `POST /login` and `POST /logout` exist only with the session adapter
#[must_use]
pub fn build_router(module: &AuthnModule) -> Router {
    let protected = module.protect(Router::new().route("/me", get(me)));

    let mut router = Router::new().route("/health", get(health)).merge(protected);
    if let Some(session) = module.session() {
        router = router.merge(session_routes(Arc::clone(session)));
    }

    router.layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn me(Authenticated(identity): Authenticated) -> Json<Identity> {
    Json(identity)
}
