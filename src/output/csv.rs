use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use crate::consts::EXPORT_DATE_FORMAT;
use crate::core::ExportRow;
use crate::error::AppError;

const HEADER: &str = "ID,Project,Task,Start Time,End Time,Duration";

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// File name for an export made on `local_date`: `sessions_MM-DD-YYYY.csv`
pub(crate) fn export_file_name(local_date: NaiveDate) -> String {
    format!("sessions_{}.csv", local_date.format(EXPORT_DATE_FORMAT))
}

/// Metadata row, header row, then one row per session.
pub(crate) fn output_export_csv(rows: &[ExportRow], exported_on: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Exported on,{}", csv_escape(exported_on));
    let _ = writeln!(out, "{HEADER}");
    for row in rows {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            row.id,
            csv_escape(&row.project),
            csv_escape(&row.task),
            csv_escape(&row.start),
            csv_escape(&row.end),
            csv_escape(&row.duration),
        );
    }
    out
}

/// Write an export into `dir`, creating it if needed. Returns the file path.
pub(crate) fn write_export_csv(
    dir: &Path,
    local_date: NaiveDate,
    content: &str,
) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(local_date));
    fs::write(&path, content)?;
    debug!(path = %path.display(), bytes = content.len(), "wrote export");
    Ok(path)
}
