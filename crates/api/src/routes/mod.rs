pub mod auth;
pub mod health;
pub mod queries;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                 register a client account (public)
/// /auth/login                    login (public)
/// /auth/logout                   logout (requires auth)
/// /auth/session                  current session (public)
///
/// /queries                       list (auth), submit (client)
/// /queries/{id}                  get (auth)
/// /queries/{id}/status           update status (support)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/queries", queries::router())
}
