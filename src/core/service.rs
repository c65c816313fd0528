//! Session lifecycle and query operations
//!
//! Idle/Running state is read from the store on every call; nothing about the
//! active session is held in memory. Interactive confirmation belongs to the
//! command-line shell, so every operation here runs unconditionally once called.

use chrono::{DateTime, Utc};

use crate::cli::SortOrder;
use crate::consts::{ACTIVE_MARKER, DEFAULT_TASK, NOT_AVAILABLE, RUNNING_MARKER};
use crate::core::filter::SessionFilter;
use crate::core::types::{ExportRow, Session, SessionView};
use crate::error::AppError;
use crate::store::SessionStore;
use crate::utils::{Timezone, format_datetime, format_duration, format_time};

/// Result of a successful `start`
#[derive(Debug)]
pub(crate) struct Started {
    pub(crate) session: Session,
    pub(crate) start_display: String,
    /// Sessions stopped to make room for this one
    pub(crate) replaced: Vec<Session>,
}

#[derive(Debug)]
pub(crate) enum StopOutcome {
    /// Nothing was running
    Idle,
    Stopped(SessionView),
}

pub(crate) struct SessionService {
    store: SessionStore,
    timezone: Timezone,
}

impl SessionService {
    pub(crate) fn new(store: SessionStore, timezone: Timezone) -> Self {
        SessionService { store, timezone }
    }

    /// Start a session. While another session is running this fails with
    /// `Conflict` unless `replace_active` is set, in which case the running
    /// session is stopped at `now` in the same transaction.
    pub(crate) fn start(
        &mut self,
        project: &str,
        task: Option<&str>,
        replace_active: bool,
        now: DateTime<Utc>,
    ) -> Result<Started, AppError> {
        let project = project.trim();
        let task = task
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TASK);

        let (replaced, session) = if replace_active {
            self.store.replace_open(project, task, now)?
        } else {
            (Vec::new(), self.store.create(project, task, now)?)
        };

        let start_display = self.display(Some(session.start_time));
        Ok(Started {
            session,
            start_display,
            replaced,
        })
    }

    pub(crate) fn stop(&mut self, now: DateTime<Utc>) -> Result<StopOutcome, AppError> {
        let Some(open) = self.store.find_most_recent_open()? else {
            return Ok(StopOutcome::Idle);
        };
        let closed = self.store.close(open.id, now)?;
        let end = self.display(closed.end_time);
        let duration = format_duration(closed.start_time, closed.end_time, now);
        Ok(StopOutcome::Stopped(SessionView {
            start: self.display(Some(closed.start_time)),
            end,
            duration,
            session: closed,
        }))
    }

    /// The running session, measured against `now`, or `None` when idle.
    pub(crate) fn current(&self, now: DateTime<Utc>) -> Result<Option<SessionView>, AppError> {
        let Some(open) = self.store.find_open()? else {
            return Ok(None);
        };
        Ok(Some(SessionView {
            start: self.display(Some(open.start_time)),
            end: ACTIVE_MARKER.to_string(),
            duration: format_duration(open.start_time, None, now),
            session: open,
        }))
    }

    pub(crate) fn summary(
        &self,
        filter: SessionFilter,
        order: SortOrder,
        now: DateTime<Utc>,
    ) -> Result<Vec<SessionView>, AppError> {
        let sessions = self.query(filter, order, now)?;
        Ok(sessions
            .into_iter()
            .map(|session| self.summarize(session, now))
            .collect())
    }

    pub(crate) fn export(
        &self,
        filter: SessionFilter,
        order: SortOrder,
        now: DateTime<Utc>,
    ) -> Result<Vec<ExportRow>, AppError> {
        Ok(self
            .summary(filter, order, now)?
            .into_iter()
            .map(ExportRow::from)
            .collect())
    }

    /// Look a session up before asking the user to confirm its removal.
    pub(crate) fn find(&self, id: i64) -> Result<Session, AppError> {
        validate_id(id)?;
        self.store
            .get_by_id(id)?
            .ok_or(AppError::NotFound { id })
    }

    /// Irreversibly delete a session. Only call after the user has agreed.
    pub(crate) fn remove(&mut self, id: i64) -> Result<(), AppError> {
        validate_id(id)?;
        self.store.delete(id)
    }

    pub(crate) fn display(&self, ts: Option<DateTime<Utc>>) -> String {
        format_datetime(ts.map(|ts| self.timezone.to_local(ts)))
    }

    /// Local time of day only, `HH:MM:SS`
    pub(crate) fn time_display(&self, ts: DateTime<Utc>) -> String {
        format_time(Some(self.timezone.to_local(ts)))
    }

    fn query(
        &self,
        filter: SessionFilter,
        order: SortOrder,
        now: DateTime<Utc>,
    ) -> Result<Vec<Session>, AppError> {
        let window = filter.window(now, self.timezone);
        match (window.since, window.until) {
            (None, _) => self.store.query_all(order),
            (Some(since), None) => self.store.query_by_start_after(since, order),
            (Some(since), Some(until)) => self.store.query_between(since, until, order),
        }
    }

    fn summarize(&self, session: Session, now: DateTime<Utc>) -> SessionView {
        let (end, duration) = match session.end_time {
            Some(end) => (
                self.display(Some(end)),
                format_duration(session.start_time, Some(end), now),
            ),
            None => (NOT_AVAILABLE.to_string(), RUNNING_MARKER.to_string()),
        };
        SessionView {
            start: self.display(Some(session.start_time)),
            end,
            duration,
            session,
        }
    }
}

/// Parse a session id typed on the command line.
pub(crate) fn parse_session_id(raw: &str) -> Result<i64, AppError> {
    let id = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::Validation(format!("Session ID must be an integer, got \"{raw}\"")))?;
    validate_id(id)?;
    Ok(id)
}

fn validate_id(id: i64) -> Result<(), AppError> {
    if id <= 0 {
        return Err(AppError::Validation(
            "Session ID must be a positive integer".to_string(),
        ));
    }
    Ok(())
}
