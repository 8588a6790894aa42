//! Repository for the `queries` table.

use chrono::NaiveDateTime;
use sqlx::PgPool;
use cqms_core::query::{STATUS_OPEN, STATUS_RESOLVED};
use cqms_core::types::DbId;

use crate::models::query::{CreateQuery, ImportQuery, Query, UpdateQueryStatus};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "query_id, client_name, email_id, mobile_number, query_heading, \
                       query_text, status, priority, submitted_on, submitted_time, \
                       resolved_on, resolved_time, assigned_to";

/// Provides create/read/update operations for queries. Rows are never deleted.
pub struct QueryRepo;

impl QueryRepo {
    /// Insert a client submission with status `Open`, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQuery) -> Result<Query, sqlx::Error> {
        let query = format!(
            "INSERT INTO queries (client_name, email_id, mobile_number, query_heading, \
                                  query_text, status, priority, submitted_on, submitted_time)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Query>(&query)
            .bind(&input.client_name)
            .bind(&input.email_id)
            .bind(&input.mobile_number)
            .bind(&input.query_heading)
            .bind(&input.query_text)
            .bind(STATUS_OPEN)
            .bind(&input.priority)
            .bind(input.submitted_on)
            .bind(input.submitted_time)
            .fetch_one(pool)
            .await
    }

    /// Insert a historical row verbatim (seed import).
    pub async fn import(pool: &PgPool, input: &ImportQuery) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO queries (client_name, email_id, mobile_number, query_heading, \
                                  query_text, status, priority, submitted_on, submitted_time, \
                                  resolved_on, resolved_time, assigned_to)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING query_id",
        )
        .bind(&input.client_name)
        .bind(&input.email_id)
        .bind(&input.mobile_number)
        .bind(&input.query_heading)
        .bind(&input.query_text)
        .bind(&input.status)
        .bind(&input.priority)
        .bind(input.submitted_on)
        .bind(input.submitted_time)
        .bind(input.resolved_on)
        .bind(input.resolved_time)
        .bind(&input.assigned_to)
        .fetch_one(pool)
        .await
    }

    /// Find a query by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Query>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM queries WHERE query_id = $1");
        sqlx::query_as::<_, Query>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every query, newest (highest id) first. No pagination.
    pub async fn list(pool: &PgPool) -> Result<Vec<Query>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM queries ORDER BY query_id DESC");
        sqlx::query_as::<_, Query>(&query).fetch_all(pool).await
    }

    /// Total number of rows; the seed import only runs when this is zero.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM queries")
            .fetch_one(pool)
            .await
    }

    /// Overwrite status and assignee of a query in a single statement.
    ///
    /// The resolution date/time is stamped with `now` when the row moves into
    /// `Resolved`, kept when it was already `Resolved`, and cleared for any
    /// other status. Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQueryStatus,
        now: NaiveDateTime,
    ) -> Result<Option<Query>, sqlx::Error> {
        // In SET expressions `status` / `resolved_*` refer to the old row.
        let query = format!(
            "UPDATE queries SET
                status = $2,
                assigned_to = $3,
                resolved_on = CASE
                    WHEN $2 <> $4 THEN NULL
                    WHEN status = $4 THEN resolved_on
                    ELSE $5
                END,
                resolved_time = CASE
                    WHEN $2 <> $4 THEN NULL
                    WHEN status = $4 THEN resolved_time
                    ELSE $6
                END
             WHERE query_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Query>(&query)
            .bind(id)
            .bind(input.status.as_str())
            .bind(&input.assigned_to)
            .bind(STATUS_RESOLVED)
            .bind(now.date())
            .bind(now.time())
            .fetch_optional(pool)
            .await
    }
}
