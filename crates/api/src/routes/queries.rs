//! Route definitions for the `/queries` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::queries;
use crate::state::AppState;

/// Routes mounted at `/queries`.
///
/// ```text
/// GET    /              -> list_queries
/// POST   /              -> submit_query (client only)
/// GET    /{id}          -> get_query
/// PUT    /{id}/status   -> update_query_status (support only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(queries::list_queries).post(queries::submit_query),
        )
        .route("/{id}", get(queries::get_query))
        .route("/{id}/status", put(queries::update_query_status))
}
