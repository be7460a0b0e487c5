#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! HTTP message values for authgate.
//!
//! Authenticators never see the framework's mutable request type. The host
//! snapshots the parts it needs into an [`AuthRequest`], and rejections are
//! described by an [`AuthResponse`] that the host converts back into a
//! framework response.
//!
//! - [`AuthRequest`] - immutable inbound request (method, URI, headers, body)
//! - [`AuthResponse`] - immutable outbound response (status, headers, body)
//! - [`Problem`] - RFC 9457 problem details body
//! - [`challenge`] - `WWW-Authenticate` values with an escaped realm

pub mod challenge;
pub mod problem;
pub mod request;
pub mod response;

pub use challenge::challenge;
pub use problem::{PROBLEM_CONTENT_TYPE, Problem};
pub use request::{AuthRequest, AuthRequestBuilder};
pub use response::AuthResponse;
