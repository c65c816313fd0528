use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, ToSql, params};
use tracing::{debug, warn};

use crate::cli::SortOrder;
use crate::consts::DEFAULT_TASK;
use crate::core::Session;
use crate::error::AppError;

use super::schema::{
    COUNT_OPEN, SCHEMA, SELECT_COLUMNS, SINGLE_OPEN_INDEX, decode_timestamp, encode_timestamp,
};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const OPEN_OLDEST_FIRST: &str =
    "WHERE end_time IS NULL ORDER BY start_time ASC, id ASC";
const OPEN_NEWEST_FIRST: &str =
    "WHERE end_time IS NULL ORDER BY start_time DESC, id DESC LIMIT 1";

/// Row as stored, before timestamps are decoded
struct RawSession {
    id: i64,
    project: String,
    task: Option<String>,
    start_time: String,
    end_time: Option<String>,
}

impl RawSession {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawSession {
            id: row.get(0)?,
            project: row.get(1)?,
            task: row.get(2)?,
            start_time: row.get(3)?,
            end_time: row.get(4)?,
        })
    }

    fn decode(self) -> Result<Session, AppError> {
        let start_time = decode_timestamp(self.id, &self.start_time)?;
        let end_time = match self.end_time {
            Some(raw) => Some(decode_timestamp(self.id, &raw)?),
            None => None,
        };
        Ok(Session {
            id: self.id,
            project: self.project,
            task: self
                .task
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_TASK.to_string()),
            start_time,
            end_time,
        })
    }
}

/// Persistent session table backed by SQLite.
///
/// Every write runs in its own transaction, so a failed write leaves the table
/// unchanged. The single-open-session rule is re-checked inside the write
/// transaction, and backed by a unique index when existing data allows it.
pub(crate) struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    pub(crate) fn open(path: &Path) -> Result<Self, AppError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened session database");
        Self::from_connection(conn)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self, AppError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, AppError> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(SCHEMA)?;
        let open: i64 = conn.query_row(COUNT_OPEN, [], |row| row.get(0))?;
        if open > 1 {
            warn!(open, "several sessions are open; single-open index not applied");
        } else {
            conn.execute_batch(SINGLE_OPEN_INDEX)?;
        }
        Ok(SessionStore { conn })
    }

    /// Insert a new open session. Fails with `Conflict` if one is already open.
    pub(crate) fn create(
        &mut self,
        project: &str,
        task: &str,
        start_time: DateTime<Utc>,
    ) -> Result<Session, AppError> {
        validate_project(project)?;
        let tx = self.conn.transaction()?;
        if let Some(active) = select(&tx, OPEN_OLDEST_FIRST, &[])?.into_iter().next() {
            return Err(AppError::Conflict {
                active: Box::new(active),
            });
        }
        let session = insert(&tx, project, task, start_time)?;
        tx.commit()?;
        debug!(id = session.id, project, "created session");
        Ok(session)
    }

    /// Close every open session at `now` and open a new one, atomically.
    /// Returns the sessions that were closed and the new session.
    pub(crate) fn replace_open(
        &mut self,
        project: &str,
        task: &str,
        now: DateTime<Utc>,
    ) -> Result<(Vec<Session>, Session), AppError> {
        validate_project(project)?;
        let tx = self.conn.transaction()?;
        let open = select(&tx, OPEN_OLDEST_FIRST, &[])?;
        let mut closed = Vec::with_capacity(open.len());
        for session in open {
            closed.push(close_in(&tx, session.id, now)?);
        }
        let session = insert(&tx, project, task, now)?;
        tx.commit()?;
        debug!(id = session.id, closed = closed.len(), "replaced active session");
        Ok((closed, session))
    }

    pub(crate) fn find_open(&self) -> Result<Option<Session>, AppError> {
        Ok(select(&self.conn, OPEN_OLDEST_FIRST, &[])?.into_iter().next())
    }

    /// Most recently started open session; ties go to the higher id.
    pub(crate) fn find_most_recent_open(&self) -> Result<Option<Session>, AppError> {
        Ok(select(&self.conn, OPEN_NEWEST_FIRST, &[])?.into_iter().next())
    }

    pub(crate) fn close(&mut self, id: i64, end_time: DateTime<Utc>) -> Result<Session, AppError> {
        let tx = self.conn.transaction()?;
        let session = close_in(&tx, id, end_time)?;
        tx.commit()?;
        debug!(id, "closed session");
        Ok(session)
    }

    pub(crate) fn get_by_id(&self, id: i64) -> Result<Option<Session>, AppError> {
        get(&self.conn, id)
    }

    pub(crate) fn query_by_start_after(
        &self,
        threshold: DateTime<Utc>,
        order: SortOrder,
    ) -> Result<Vec<Session>, AppError> {
        let clause = format!("WHERE start_time >= ?1 {}", order_clause(order));
        select(&self.conn, &clause, &[&encode_timestamp(threshold)])
    }

    /// Sessions with `since <= start_time <= until`
    pub(crate) fn query_between(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
        order: SortOrder,
    ) -> Result<Vec<Session>, AppError> {
        let clause = format!(
            "WHERE start_time >= ?1 AND start_time <= ?2 {}",
            order_clause(order)
        );
        select(
            &self.conn,
            &clause,
            &[&encode_timestamp(since), &encode_timestamp(until)],
        )
    }

    pub(crate) fn query_all(&self, order: SortOrder) -> Result<Vec<Session>, AppError> {
        select(&self.conn, order_clause(order), &[])
    }

    pub(crate) fn delete(&mut self, id: i64) -> Result<(), AppError> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(AppError::NotFound { id });
        }
        tx.commit()?;
        debug!(id, "deleted session");
        Ok(())
    }
}

fn validate_project(project: &str) -> Result<(), AppError> {
    if project.trim().is_empty() {
        return Err(AppError::Validation(
            "Project name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn order_clause(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "ORDER BY start_time ASC, id ASC",
        SortOrder::Desc => "ORDER BY start_time DESC, id DESC",
    }
}

fn select(conn: &Connection, clause: &str, args: &[&dyn ToSql]) -> Result<Vec<Session>, AppError> {
    let sql = format!("{SELECT_COLUMNS} {clause}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(args, RawSession::from_row)?;
    let mut sessions = Vec::new();
    for row in rows {
        sessions.push(row?.decode()?);
    }
    Ok(sessions)
}

fn get(conn: &Connection, id: i64) -> Result<Option<Session>, AppError> {
    let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
    conn.query_row(&sql, params![id], RawSession::from_row)
        .optional()?
        .map(RawSession::decode)
        .transpose()
}

fn insert(
    conn: &Connection,
    project: &str,
    task: &str,
    start_time: DateTime<Utc>,
) -> Result<Session, AppError> {
    conn.execute(
        "INSERT INTO sessions (project, task, start_time) VALUES (?1, ?2, ?3)",
        params![project, task, encode_timestamp(start_time)],
    )?;
    let id = conn.last_insert_rowid();
    get(conn, id)?.ok_or(AppError::NotFound { id })
}

fn close_in(conn: &Connection, id: i64, end_time: DateTime<Utc>) -> Result<Session, AppError> {
    let Some(existing) = get(conn, id)? else {
        return Err(AppError::NotFound { id });
    };
    if !existing.is_open() {
        return Err(AppError::AlreadyClosed { id });
    }
    conn.execute(
        "UPDATE sessions SET end_time = ?1 WHERE id = ?2 AND end_time IS NULL",
        params![encode_timestamp(end_time), id],
    )?;
    get(conn, id)?.ok_or(AppError::NotFound { id })
}
