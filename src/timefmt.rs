//! Fixed date/time entry formats used by every dialogue step.
//!
//! All user-entered timestamps use the literal pattern `dd.mm.yyyy HH:MM`,
//! report dates use `dd.mm.yyyy`, operation times use `HH:MM`. Anything that
//! does not parse is a recoverable [`InputFormatError`].

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::InputFormatError;

pub const DATETIME_PATTERN: &str = "%d.%m.%Y %H:%M";
pub const DATE_PATTERN: &str = "%d.%m.%Y";
pub const TIME_PATTERN: &str = "%H:%M";

/// Human-facing hints shown in prompts and re-prompts.
pub const DATETIME_HINT: &str = "dd.mm.yyyy HH:MM";
pub const DATE_HINT: &str = "dd.mm.yyyy";
pub const TIME_HINT: &str = "HH:MM";

pub fn parse_datetime(input: &str) -> Result<NaiveDateTime, InputFormatError> {
    NaiveDateTime::parse_from_str(input.trim(), DATETIME_PATTERN).map_err(|_| InputFormatError {
        input: input.trim().to_string(),
        pattern: DATETIME_PATTERN,
    })
}

pub fn parse_date(input: &str) -> Result<NaiveDate, InputFormatError> {
    NaiveDate::parse_from_str(input.trim(), DATE_PATTERN).map_err(|_| InputFormatError {
        input: input.trim().to_string(),
        pattern: DATE_PATTERN,
    })
}

pub fn parse_time(input: &str) -> Result<NaiveTime, InputFormatError> {
    NaiveTime::parse_from_str(input.trim(), TIME_PATTERN).map_err(|_| InputFormatError {
        input: input.trim().to_string(),
        pattern: TIME_PATTERN,
    })
}

pub fn format_datetime(value: NaiveDateTime) -> String {
    value.format(DATETIME_PATTERN).to_string()
}

pub fn format_date(value: NaiveDate) -> String {
    value.format(DATE_PATTERN).to_string()
}

/// Wall-clock time used for lead-time checks and record timestamps.
pub fn now_local() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// True when `execution` falls short of the required numeric lead time,
/// i.e. the application is being submitted late.
pub fn is_late(execution: NaiveDateTime, now: NaiveDateTime, lead_hours: u32) -> bool {
    execution < now + Duration::hours(i64::from(lead_hours))
}
