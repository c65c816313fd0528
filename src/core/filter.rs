//! Which sessions a summary or export covers

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::AppError;
use crate::utils::{Timezone, parse_date, start_of_week_utc, utc_midnight};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionFilter {
    All,
    /// Started at or after local midnight
    Today,
    /// Started at or after Monday 00:00 UTC
    ThisWeek,
    /// Started between 00:00 UTC on `start` and 00:00 UTC on `end`, both included
    DateRange { start: NaiveDate, end: NaiveDate },
}

/// Window over `start_time`: `since <= start_time <= until`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StartWindow {
    pub(crate) since: Option<DateTime<Utc>>,
    pub(crate) until: Option<DateTime<Utc>>,
}

impl SessionFilter {
    /// Resolve command-line flags. When several are given, today wins over
    /// week, and week wins over a date range. A range needs both dates; with
    /// only one of them every session is selected.
    pub(crate) fn from_flags(
        today: bool,
        week: bool,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Self, AppError> {
        if today {
            return Ok(SessionFilter::Today);
        }
        if week {
            return Ok(SessionFilter::ThisWeek);
        }
        match (start, end) {
            (Some(start), Some(end)) => {
                let start = parse_date(start)?;
                let end = parse_date(end)?;
                if start > end {
                    return Err(AppError::Validation(format!(
                        "Start date {start} is after end date {end}"
                    )));
                }
                Ok(SessionFilter::DateRange { start, end })
            }
            _ => Ok(SessionFilter::All),
        }
    }

    pub(crate) fn window(self, now: DateTime<Utc>, timezone: Timezone) -> StartWindow {
        match self {
            SessionFilter::All => StartWindow {
                since: None,
                until: None,
            },
            SessionFilter::Today => StartWindow {
                since: Some(timezone.start_of_day_utc(now)),
                until: None,
            },
            SessionFilter::ThisWeek => StartWindow {
                since: Some(start_of_week_utc(now)),
                until: None,
            },
            SessionFilter::DateRange { start, end } => StartWindow {
                since: Some(utc_midnight(start)),
                until: Some(utc_midnight(end)),
            },
        }
    }

    pub(crate) fn title(self) -> String {
        match self {
            SessionFilter::All => "All Sessions".to_string(),
            SessionFilter::Today => "Today's Sessions".to_string(),
            SessionFilter::ThisWeek => "This Week's Sessions".to_string(),
            SessionFilter::DateRange { start, end } => format!("Sessions {start} to {end}"),
        }
    }
}
