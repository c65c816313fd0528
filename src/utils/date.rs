use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};

use crate::consts::{DATE_FORMAT, DATETIME_DISPLAY_FORMAT, TIME_DISPLAY_FORMAT};
use crate::error::AppError;

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| AppError::InvalidDate {
        input: s.to_string(),
    })
}

/// `MM-DD-YYYY HH:MM:SS`, or an empty string when there is nothing to show.
pub(crate) fn format_datetime(local: Option<DateTime<FixedOffset>>) -> String {
    local
        .map(|dt| dt.format(DATETIME_DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

/// `HH:MM:SS`, or an empty string when there is nothing to show.
pub(crate) fn format_time(local: Option<DateTime<FixedOffset>>) -> String {
    local
        .map(|dt| dt.format(TIME_DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

/// Monday 00:00 UTC of the week containing `now`.
///
/// The weekday is taken from the UTC calendar, not the display zone, so near
/// midnight the "week" can disagree with the local calendar.
pub(crate) fn start_of_week_utc(now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    monday.and_time(NaiveTime::MIN).and_utc()
}

/// UTC midnight at the start of `date`.
pub(crate) fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
