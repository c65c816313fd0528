use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::AppError;

/// Idempotent schema setup, run every time the store is opened.
///
/// Timestamps are fixed-width RFC 3339 UTC strings so that SQL string
/// comparison orders them chronologically.
pub(super) const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS sessions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    project     TEXT NOT NULL CHECK (length(project) > 0),
    task        TEXT,
    start_time  TEXT NOT NULL,
    end_time    TEXT
);
CREATE INDEX IF NOT EXISTS idx_sessions_start_time ON sessions(start_time);
";

/// At most one row without an `end_time`. Only applied once the table
/// satisfies it; older databases may hold several open rows.
pub(super) const SINGLE_OPEN_INDEX: &str = "
CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_single_open
    ON sessions((end_time IS NULL)) WHERE end_time IS NULL;
";

pub(super) const COUNT_OPEN: &str = "SELECT COUNT(*) FROM sessions WHERE end_time IS NULL";

pub(super) const SELECT_COLUMNS: &str = "SELECT id, project, task, start_time, end_time FROM sessions";

pub(super) fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(super) fn decode_timestamp(id: i64, raw: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::CorruptTimestamp {
            id,
            raw: raw.to_string(),
        })
}
