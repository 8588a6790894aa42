//! Handlers for the `/queries` resource.
//!
//! Clients submit queries; support staff update status and assignment.
//! Both roles list the same full set of queries.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use cqms_core::error::CoreError;
use cqms_core::query::{normalize_assignee, Priority, QuerySubmission};
use cqms_core::types::DbId;
use cqms_db::models::query::{CreateQuery, Query, UpdateQueryStatus};
use cqms_db::repositories::QueryRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireClient, RequireSupport};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /queries`.
#[derive(Debug, Deserialize)]
pub struct SubmitQueryRequest {
    pub client_name: String,
    pub email_id: Option<String>,
    pub mobile_number: Option<String>,
    pub query_heading: Option<String>,
    pub query_text: String,
    pub priority: Priority,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Query", id })
}

/// GET /api/v1/queries
///
/// All queries, newest first.
pub async fn list_queries(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Query>>>> {
    let queries = QueryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: queries }))
}

/// POST /api/v1/queries
///
/// Submit a new query. Status is always `Open`; the submission date and
/// time are stamped server-side (UTC).
pub async fn submit_query(
    RequireClient(user): RequireClient,
    State(state): State<AppState>,
    Json(input): Json<SubmitQueryRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Query>>)> {
    let submission = QuerySubmission::new(
        &input.client_name,
        input.email_id.as_deref(),
        input.mobile_number.as_deref(),
        input.query_heading.as_deref(),
        &input.query_text,
        input.priority,
    )?;

    let create = CreateQuery::from_submission(submission, Utc::now().naive_utc());
    let query = QueryRepo::create(&state.pool, &create).await?;

    tracing::info!(
        query_id = query.query_id,
        username = %user.username,
        priority = %query.priority,
        "Query submitted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: query })))
}

/// GET /api/v1/queries/{id}
pub async fn get_query(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Query>>> {
    let query = QueryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: query }))
}

/// PUT /api/v1/queries/{id}/status
///
/// Overwrite status and assignee. Moving into `Resolved` stamps the
/// resolution date/time; leaving it clears them. Unknown ids return 404.
pub async fn update_query_status(
    RequireSupport(user): RequireSupport,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQueryStatus>,
) -> AppResult<Json<DataResponse<Query>>> {
    let update = UpdateQueryStatus {
        status: input.status,
        assigned_to: normalize_assignee(input.assigned_to.as_deref())?,
    };

    let query = QueryRepo::update_status(&state.pool, id, &update, Utc::now().naive_utc())
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        query_id = id,
        status = %update.status,
        assigned_to = update.assigned_to.as_deref().unwrap_or(""),
        username = %user.username,
        "Query status updated",
    );

    Ok(Json(DataResponse { data: query }))
}
