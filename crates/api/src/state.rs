use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Holds no per-user data: session context travels with each request as a
/// bearer token (see [`crate::middleware::auth::AuthUser`]).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cqms_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
