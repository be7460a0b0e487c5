//! HTTP surface of the `AuthN` module.

pub mod middleware;
pub mod policy;
pub mod session;

pub use middleware::{AuthState, Authenticated, authn_middleware};
pub use policy::{AuthRequirement, RoutePolicy};
pub use session::session_routes;
