/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date column (`DATE`).
pub type Date = chrono::NaiveDate;

/// Time-of-day column (`TIME`).
pub type Time = chrono::NaiveTime;
