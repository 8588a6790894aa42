//! One-time import of historical queries from a CSV snapshot.
//!
//! The import only runs against an empty `queries` table, and the download
//! only happens after that emptiness check. Bad rows are logged and skipped;
//! a failed download or unreadable header abandons the import. Nothing here
//! aborts startup.

use std::time::Duration;

use cqms_core::query::{blank_to_none, parse_date, parse_time, Priority, QueryStatus};
use cqms_db::models::query::ImportQuery;
use cqms_db::repositories::QueryRepo;
use cqms_db::DbPool;
use serde::Deserialize;

/// Columns the snapshot must provide (extra columns are ignored).
pub const SEED_COLUMNS: [&str; 12] = [
    "client_name",
    "email_id",
    "mobile_number",
    "query_heading",
    "query_text",
    "status",
    "priority",
    "submitted_on",
    "submitted_time",
    "resolved_on",
    "resolved_time",
    "assigned_to",
];

/// HTTP timeout for the snapshot download.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Error / outcome
// ---------------------------------------------------------------------------

/// Reasons the snapshot could not be read at all.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("download failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV is missing required columns: {0}")]
    MissingColumns(String),
}

/// What the seed step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// No seed URL configured.
    Disabled,
    /// The table already had rows; nothing was downloaded.
    Skipped { existing: i64 },
    /// Download or header failure; the table is unchanged.
    Failed(String),
    /// Rows were imported. `skipped` counts rows that failed to parse or insert.
    Imported { inserted: usize, skipped: usize },
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// One CSV row as read, before validation. Empty cells become `None`.
#[derive(Debug, Deserialize)]
struct SeedRecord {
    client_name: Option<String>,
    email_id: Option<String>,
    mobile_number: Option<String>,
    query_heading: Option<String>,
    query_text: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    submitted_on: Option<String>,
    submitted_time: Option<String>,
    resolved_on: Option<String>,
    resolved_time: Option<String>,
    assigned_to: Option<String>,
}

impl SeedRecord {
    fn into_import(self) -> Result<ImportQuery, String> {
        let client_name =
            blank_to_none(self.client_name.as_deref()).ok_or("client_name is empty")?;
        let query_text = blank_to_none(self.query_text.as_deref()).ok_or("query_text is empty")?;

        let status = QueryStatus::from_str_value(
            blank_to_none(self.status.as_deref()).as_deref().unwrap_or_default(),
        )?;
        let priority = Priority::from_str_value(
            blank_to_none(self.priority.as_deref()).as_deref().unwrap_or_default(),
        )?;

        let submitted_on =
            parse_date(self.submitted_on.as_deref())?.ok_or("submitted_on is empty")?;
        let submitted_time =
            parse_time(self.submitted_time.as_deref())?.ok_or("submitted_time is empty")?;

        Ok(ImportQuery {
            client_name,
            email_id: blank_to_none(self.email_id.as_deref()),
            mobile_number: blank_to_none(self.mobile_number.as_deref()),
            query_heading: blank_to_none(self.query_heading.as_deref()),
            query_text,
            status: status.as_str().to_string(),
            priority: priority.as_str().to_string(),
            submitted_on,
            submitted_time,
            resolved_on: parse_date(self.resolved_on.as_deref())?,
            resolved_time: parse_time(self.resolved_time.as_deref())?,
            assigned_to: blank_to_none(self.assigned_to.as_deref()),
        })
    }
}

/// Rows parsed from a snapshot.
#[derive(Debug, Default)]
pub struct ParsedSeed {
    pub rows: Vec<ImportQuery>,
    /// Rows that could not be read or failed validation.
    pub rejected: usize,
}

/// Parse snapshot bytes. Fails only if the header is unreadable or lacks a
/// required column; bad data rows are counted in `rejected`.
pub fn parse_csv(data: &[u8]) -> Result<ParsedSeed, SeedError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = SEED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(SeedError::MissingColumns(missing.join(", ")));
    }

    let mut parsed = ParsedSeed::default();
    for (index, record) in reader.deserialize::<SeedRecord>().enumerate() {
        // Line 1 is the header.
        let line = index + 2;
        match record.map_err(|e| e.to_string()).and_then(SeedRecord::into_import) {
            Ok(row) => parsed.rows.push(row),
            Err(reason) => {
                tracing::warn!(line, %reason, "Skipping seed row");
                parsed.rejected += 1;
            }
        }
    }
    Ok(parsed)
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Download the snapshot body.
pub async fn fetch_csv(url: &str) -> Result<Vec<u8>, SeedError> {
    let client = reqwest::Client::builder().timeout(DOWNLOAD_TIMEOUT).build()?;
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// Insert parsed rows one statement at a time. A failing row is logged and
/// skipped. Returns `(inserted, skipped)`.
pub async fn insert_rows(pool: &DbPool, rows: &[ImportQuery]) -> (usize, usize) {
    let mut inserted = 0;
    let mut skipped = 0;
    for row in rows {
        match QueryRepo::import(pool, row).await {
            Ok(_) => inserted += 1,
            Err(e) => {
                tracing::warn!(error = %e, client_name = %row.client_name, "Error importing row");
                skipped += 1;
            }
        }
    }
    (inserted, skipped)
}

/// Import the snapshot at `url` if, and only if, `queries` is empty.
///
/// The only error returned is a failure to count rows; everything after
/// that is reported through [`SeedOutcome`].
pub async fn import_if_empty(pool: &DbPool, url: Option<&str>) -> Result<SeedOutcome, sqlx::Error> {
    let Some(url) = url else {
        return Ok(SeedOutcome::Disabled);
    };

    let existing = QueryRepo::count(pool).await?;
    if existing > 0 {
        tracing::debug!(existing, "Queries table not empty, skipping seed import");
        return Ok(SeedOutcome::Skipped { existing });
    }

    let parsed = match fetch_csv(url).await.and_then(|body| parse_csv(&body)) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, url, "Could not load seed CSV");
            return Ok(SeedOutcome::Failed(e.to_string()));
        }
    };

    let (inserted, failed) = insert_rows(pool, &parsed.rows).await;
    let skipped = parsed.rejected + failed;
    tracing::info!(inserted, skipped, "Seed import finished");

    Ok(SeedOutcome::Imported { inserted, skipped })
}
