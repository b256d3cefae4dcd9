//! Civil-time conversions for session schedules.
//!
//! Upstream dates are `YYYY-MM-DD`; times are `HH:MM:SSZ` in practice, but
//! bare wall-clock times also occur. Bare times are read as wall-clock time in
//! the home timezone using the tz database, so the DST offset in force on that
//! calendar date is applied. Times carrying `Z` or a numeric offset are
//! absolute instants and are only projected into the home timezone for display.

use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::helpers::capitalize;

/// Data-quality errors in upstream date/time values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("invalid date '{0}'")]
    InvalidDate(String),
    #[error("invalid time '{0}'")]
    InvalidTime(String),
    #[error("missing date")]
    MissingDate,
    #[error("missing time of day")]
    MissingTime,
    #[error("{0} does not exist in {1} (daylight-saving gap)")]
    NonexistentLocalTime(String, Tz),
    #[error("range ends ({end}) before it starts ({start})")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

pub fn parse_date(date: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| TimeError::InvalidDate(date.to_string()))
}

fn parse_wall_clock(time: &str) -> Result<NaiveTime, TimeError> {
    NaiveTime::parse_from_str(time, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map_err(|_| TimeError::InvalidTime(time.to_string()))
}

/// Resolve an upstream (date, time) pair to a UTC instant.
pub fn civil_to_utc(date: &str, time: &str, tz: Tz) -> Result<DateTime<Utc>, TimeError> {
    let day = parse_date(date)?;
    let time = time.trim();
    if time.is_empty() {
        return Err(TimeError::MissingTime);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&format!("{}T{}", day, time)) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Some(utc_time) = time.strip_suffix('Z') {
        let t = parse_wall_clock(utc_time)?;
        return Ok(Utc.from_utc_datetime(&day.and_time(t)));
    }

    let local = day.and_time(parse_wall_clock(time)?);
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        // Fall-back hour: the first occurrence is the one a schedule means.
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(TimeError::NonexistentLocalTime(local.to_string(), tz)),
    }
}

/// Render an instant as `"<Weekday> <DD> <Month> - <HH:MM>"` in the home timezone,
/// e.g. `"Fri 14 March - 11:30"`.
fn format_instant(instant: DateTime<Utc>, tz: Tz) -> String {
    let local = instant.with_timezone(&tz);
    capitalize(&local.format("%a %d %B - %H:%M").to_string())
}

pub fn format_date_time(date: &str, time: &str, tz: Tz) -> Result<String, TimeError> {
    civil_to_utc(date, time, tz).map(|instant| format_instant(instant, tz))
}

/// Format an instant the way the rendering layer expects ISO strings:
/// UTC with millisecond precision, e.g. `"2025-03-16T04:00:00.000Z"`.
pub fn iso_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn to_iso_instant(date: &str, time: &str, tz: Tz) -> Result<String, TimeError> {
    civil_to_utc(date, time, tz).map(iso_instant)
}

/// Inclusive day range of a weekend.
///
/// - same month: `"14 - 16 March 2025"`
/// - across months: `"30 May - 1 June 2025"`
/// - across years: `"31 December 2025 - 1 January 2026"`
/// - single day: `"16 March 2025"`
pub fn format_date_range(start: &str, end: &str) -> Result<String, TimeError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if end < start {
        return Err(TimeError::InvertedRange { start, end });
    }

    let formatted = if start == end {
        end.format("%-d %B %Y").to_string()
    } else if start.year() != end.year() {
        format!("{} - {}", start.format("%-d %B %Y"), end.format("%-d %B %Y"))
    } else if start.month() != end.month() {
        format!("{} - {}", start.format("%-d %B"), end.format("%-d %B %Y"))
    } else {
        format!("{} - {}", start.day(), end.format("%-d %B %Y"))
    };
    Ok(formatted)
}
