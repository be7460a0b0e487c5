//! `AuthN` SDK
//!
//! This crate provides the public contract of the authn module:
//!
//! - [`Authenticator`] - the capability every authentication variant implements
//! - [`UserRepository`] - collaborator that verifies username/password pairs
//! - [`Identity`] - the authenticated principal
//! - [`AuthnError`] - collaborator failures
//!
//! ## Usage
//!
//! Callers hold the abstraction only and never a concrete variant:
//!
//! ```ignore
//! use authn_sdk::Authenticator;
//!
//! async fn guard(authn: &dyn Authenticator, request: &AuthRequest) -> Result<Identity, AuthResponse> {
//!     match authn.authenticate(request).await {
//!         Ok(Some(identity)) => Ok(identity),
//!         Ok(None) | Err(_) => Err(authn.unauthorized_response(request)),
//!     }
//! }
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod repository;

// Re-export main types at crate root
pub use api::Authenticator;
pub use error::AuthnError;
pub use models::{Identity, IdentityBuilder};
pub use repository::UserRepository;

pub use authgate_http::{AuthRequest, AuthResponse, Problem};
