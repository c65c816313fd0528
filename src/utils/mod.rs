pub(crate) mod date;
pub(crate) mod duration;
pub(crate) mod logging;
pub(crate) mod timezone;

pub(crate) use date::{format_datetime, format_time, parse_date, start_of_week_utc, utc_midnight};
pub(crate) use duration::format_duration;
pub(crate) use logging::init_logging;
pub(crate) use timezone::Timezone;
