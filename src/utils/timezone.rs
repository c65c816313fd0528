use chrono::offset::Offset;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::AppError;

/// Display zone for every user-facing timestamp. Storage is always UTC.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    /// Convert a stored UTC instant to the display zone.
    pub(crate) fn to_local(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
            Timezone::Named(tz) => {
                let local = utc.with_timezone(&tz);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
        }
    }

    /// UTC instant of the most recent local midnight at or before `now`.
    pub(crate) fn start_of_day_utc(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local_now = self.to_local(now);
        let midnight = local_now.date_naive().and_time(NaiveTime::MIN);
        let resolved = match self {
            Timezone::Local => resolve_local(&Local, midnight),
            Timezone::Named(tz) => resolve_local(&tz, midnight),
        };
        // A DST gap can swallow midnight; fall back to the offset in effect now.
        resolved.unwrap_or_else(|| {
            let offset = *local_now.offset();
            (midnight - chrono::Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc()
        })
    }
}

fn resolve_local<Z: TimeZone>(zone: &Z, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    zone.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
