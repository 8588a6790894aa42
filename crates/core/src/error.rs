//! Domain error type shared by the `db` and `api` crates.

use crate::types::DbId;

/// Errors raised by domain validation and service-level checks.
///
/// The API layer maps each variant onto an HTTP status; see
/// `cqms_api::error::AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A query or user with the given id does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Caller-supplied input failed a required-field or format check.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A uniqueness rule was violated (e.g. duplicate username).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, invalid or rejected credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but the session's role may not perform the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}
