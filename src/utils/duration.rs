use chrono::{DateTime, Utc};

/// Human-readable elapsed time between `start` and `end` (or `now` while the
/// session is still running).
///
/// This is a lossy display string, not a parseable duration: hours are
/// truncated and the remainder is rounded to whole minutes (halves to even), so
/// values just under an hour render as "60m". Callers guarantee `end >= start`.
pub(crate) fn format_duration(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> String {
    let end = end.unwrap_or(now);
    let total_seconds = (end - start).num_milliseconds() as f64 / 1000.0;
    let hours = total_seconds / 3600.0;
    let minutes = (hours % 1.0) * 60.0;

    if hours >= 1.0 {
        format!("{}h {}m", hours.trunc() as i64, minutes.round_ties_even() as i64)
    } else {
        format!("{}m", minutes.round_ties_even() as i64)
    }
}
