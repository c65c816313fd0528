//! Session data model shared by the store, the service and the output sinks

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One recorded span of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Session {
    pub(crate) id: i64,
    pub(crate) project: String,
    pub(crate) task: String,
    pub(crate) start_time: DateTime<Utc>,
    /// `None` while the session is running
    pub(crate) end_time: Option<DateTime<Utc>>,
}

impl Session {
    pub(crate) fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

/// A session together with its local-time display strings
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SessionView {
    #[serde(flatten)]
    pub(crate) session: Session,
    pub(crate) start: String,
    pub(crate) end: String,
    pub(crate) duration: String,
}

/// One line of a CSV export, already formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExportRow {
    pub(crate) id: i64,
    pub(crate) project: String,
    pub(crate) task: String,
    pub(crate) start: String,
    pub(crate) end: String,
    pub(crate) duration: String,
}

impl From<SessionView> for ExportRow {
    fn from(view: SessionView) -> Self {
        ExportRow {
            id: view.session.id,
            project: view.session.project,
            task: view.session.task,
            start: view.start,
            end: view.end,
            duration: view.duration,
        }
    }
}
