//! Session extractors.
//!
//! - [`auth::AuthUser`] -- the per-request session context from a Bearer token.
//! - [`rbac::RequireClient`] -- requires the `client` role.
//! - [`rbac::RequireSupport`] -- requires the `support` role.

pub mod auth;
pub mod rbac;
