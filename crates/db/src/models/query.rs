//! Query (support ticket) entity model and DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use cqms_core::query::{QueryStatus, QuerySubmission};
use cqms_core::types::{Date, DbId, Time};

/// A row from the `queries` table.
///
/// `status` and `priority` hold the stored strings; see
/// [`cqms_core::query::QueryStatus`] and [`cqms_core::query::Priority`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Query {
    pub query_id: DbId,
    pub client_name: String,
    pub email_id: Option<String>,
    pub mobile_number: Option<String>,
    pub query_heading: Option<String>,
    pub query_text: String,
    pub status: String,
    pub priority: String,
    pub submitted_on: Date,
    pub submitted_time: Time,
    pub resolved_on: Option<Date>,
    pub resolved_time: Option<Time>,
    pub assigned_to: Option<String>,
}

/// DTO for a client submission. Status is always `Open`.
#[derive(Debug, Clone)]
pub struct CreateQuery {
    pub client_name: String,
    pub email_id: Option<String>,
    pub mobile_number: Option<String>,
    pub query_heading: Option<String>,
    pub query_text: String,
    pub priority: String,
    pub submitted_on: Date,
    pub submitted_time: Time,
}

impl CreateQuery {
    /// Stamp a validated submission with its submission date and time.
    pub fn from_submission(submission: QuerySubmission, now: NaiveDateTime) -> Self {
        Self {
            client_name: submission.client_name,
            email_id: submission.email_id,
            mobile_number: submission.mobile_number,
            query_heading: submission.query_heading,
            query_text: submission.query_text,
            priority: submission.priority.as_str().to_string(),
            submitted_on: now.date(),
            submitted_time: now.time(),
        }
    }
}

/// DTO for a historical row from the seed CSV; every column is supplied.
#[derive(Debug, Clone)]
pub struct ImportQuery {
    pub client_name: String,
    pub email_id: Option<String>,
    pub mobile_number: Option<String>,
    pub query_heading: Option<String>,
    pub query_text: String,
    pub status: String,
    pub priority: String,
    pub submitted_on: Date,
    pub submitted_time: Time,
    pub resolved_on: Option<Date>,
    pub resolved_time: Option<Time>,
    pub assigned_to: Option<String>,
}

/// Request body for a support-side status update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQueryStatus {
    pub status: QueryStatus,
    pub assigned_to: Option<String>,
}
