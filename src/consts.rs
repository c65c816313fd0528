/// Calendar date format accepted on the command line: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Local date and time shown to the user: "01-15-2025 09:30:00"
pub(crate) const DATETIME_DISPLAY_FORMAT: &str = "%m-%d-%Y %H:%M:%S";

/// Local time of day shown to the user: "09:30:00"
pub(crate) const TIME_DISPLAY_FORMAT: &str = "%H:%M:%S";

/// Date stamp used in export file names: "01-15-2025"
pub(crate) const EXPORT_DATE_FORMAT: &str = "%m-%d-%Y";

/// Task recorded when the user does not describe one
pub(crate) const DEFAULT_TASK: &str = "general work";

/// End-time marker for the session that is still running
pub(crate) const ACTIVE_MARKER: &str = "ACTIVE";

/// Duration marker for open sessions in summaries and exports
pub(crate) const RUNNING_MARKER: &str = "RUNNING";

/// End-time placeholder for open sessions in summaries and exports
pub(crate) const NOT_AVAILABLE: &str = "N/A";

pub(crate) const SEPARATOR: &str = "==================================================";
