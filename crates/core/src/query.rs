//! Query (support ticket) statuses, priorities and submission validation.
//!
//! Status and priority strings are stored verbatim in the `queries` table,
//! so the constants below must match the `CHECK` constraints in
//! `20260301000001_create_queries_table.sql` and the seed CSV values.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Date, Time};

// ---------------------------------------------------------------------------
// Status / priority constants
// ---------------------------------------------------------------------------

/// Status of every newly submitted query.
pub const STATUS_OPEN: &str = "Open";
/// A support agent has picked the query up.
pub const STATUS_IN_PROGRESS: &str = "In Progress";
/// The query is closed; resolution date/time is recorded.
pub const STATUS_RESOLVED: &str = "Resolved";

/// All valid query statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_OPEN, STATUS_IN_PROGRESS, STATUS_RESOLVED];

pub const PRIORITY_LOW: &str = "Low";
pub const PRIORITY_MEDIUM: &str = "Medium";
pub const PRIORITY_HIGH: &str = "High";

/// All valid query priorities.
pub const VALID_PRIORITIES: &[&str] = &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH];

// ---------------------------------------------------------------------------
// Field limits (match the column types)
// ---------------------------------------------------------------------------

pub const MAX_CLIENT_NAME_LENGTH: usize = 255;
pub const MAX_EMAIL_LENGTH: usize = 255;
pub const MAX_MOBILE_LENGTH: usize = 20;
pub const MAX_HEADING_LENGTH: usize = 500;
pub const MAX_QUERY_TEXT_LENGTH: usize = 10_000;
pub const MAX_ASSIGNEE_LENGTH: usize = 255;

/// Date format used by the `submitted_on` / `resolved_on` CSV columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Time format used by the `submitted_time` / `resolved_time` CSV columns.
/// `%.f` accepts optional fractional seconds.
pub const TIME_FORMAT: &str = "%H:%M:%S%.f";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle status of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl QueryStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_OPEN => Ok(Self::Open),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_RESOLVED => Ok(Self::Resolved),
            _ => Err(format!(
                "Invalid query status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => STATUS_OPEN,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Resolved => STATUS_RESOLVED,
        }
    }

    /// Whether rows in this status carry a resolution date/time.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved)
    }
}

impl std::fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client-assigned urgency of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            PRIORITY_LOW => Ok(Self::Low),
            PRIORITY_MEDIUM => Ok(Self::Medium),
            PRIORITY_HIGH => Ok(Self::High),
            _ => Err(format!(
                "Invalid priority '{s}'. Must be one of: {}",
                VALID_PRIORITIES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => PRIORITY_LOW,
            Self::Medium => PRIORITY_MEDIUM,
            Self::High => PRIORITY_HIGH,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Trim an optional text field, mapping blank input to `None`.
///
/// Optional query fields are stored as NULL when the form left them empty.
pub fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Check a required text field is present and within `max` characters.
pub fn validate_required(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    validate_max_length(field, value, max)
}

/// Check a text field does not exceed `max` characters.
pub fn validate_max_length(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max} characters (got {len})"
        )));
    }
    Ok(())
}

/// Validated, normalized input for a new query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySubmission {
    pub client_name: String,
    pub email_id: Option<String>,
    pub mobile_number: Option<String>,
    pub query_heading: Option<String>,
    pub query_text: String,
    pub priority: Priority,
}

impl QuerySubmission {
    /// Validate raw form values and build a submission.
    ///
    /// `client_name` and `query_text` are required; the optional fields are
    /// trimmed and blank values become `None`.
    pub fn new(
        client_name: &str,
        email_id: Option<&str>,
        mobile_number: Option<&str>,
        query_heading: Option<&str>,
        query_text: &str,
        priority: Priority,
    ) -> Result<Self, CoreError> {
        validate_required("Client name", client_name, MAX_CLIENT_NAME_LENGTH)?;
        validate_required("Query details", query_text, MAX_QUERY_TEXT_LENGTH)?;

        let email_id = blank_to_none(email_id);
        let mobile_number = blank_to_none(mobile_number);
        let query_heading = blank_to_none(query_heading);

        if let Some(email) = &email_id {
            validate_max_length("Email", email, MAX_EMAIL_LENGTH)?;
        }
        if let Some(mobile) = &mobile_number {
            validate_max_length("Mobile number", mobile, MAX_MOBILE_LENGTH)?;
        }
        if let Some(heading) = &query_heading {
            validate_max_length("Query heading", heading, MAX_HEADING_LENGTH)?;
        }

        Ok(Self {
            client_name: client_name.trim().to_string(),
            email_id,
            mobile_number,
            query_heading,
            query_text: query_text.trim().to_string(),
            priority,
        })
    }
}

/// Normalize the assignee of a status update (blank means unassigned).
pub fn normalize_assignee(assigned_to: Option<&str>) -> Result<Option<String>, CoreError> {
    let assignee = blank_to_none(assigned_to);
    if let Some(a) = &assignee {
        validate_max_length("Assigned to", a, MAX_ASSIGNEE_LENGTH)?;
    }
    Ok(assignee)
}

/// Parse an optional `YYYY-MM-DD` cell. Blank cells are `None`.
pub fn parse_date(value: Option<&str>) -> Result<Option<Date>, String> {
    match blank_to_none(value) {
        None => Ok(None),
        Some(v) => Date::parse_from_str(&v, DATE_FORMAT)
            .map(Some)
            .map_err(|e| format!("Invalid date '{v}': {e}")),
    }
}

/// Parse an optional `HH:MM:SS[.fff]` cell. Blank cells are `None`.
pub fn parse_time(value: Option<&str>) -> Result<Option<Time>, String> {
    match blank_to_none(value) {
        None => Ok(None),
        Some(v) => Time::parse_from_str(&v, TIME_FORMAT)
            .map(Some)
            .map_err(|e| format!("Invalid time '{v}': {e}")),
    }
}
