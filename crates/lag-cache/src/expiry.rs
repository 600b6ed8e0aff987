//! Expiry timestamp arithmetic.
//!
//! Every function takes the current time as an argument rather than reading
//! the clock, so results are deterministic. [`now`] is the only place the
//! system clock is consulted.

use crate::Value;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Current time in unix seconds.
pub fn now() -> i64 {
    Utc::now().timestamp()
}

/// Unit of a fixed expiry offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl Unit {
    /// Number of seconds in one of this unit.
    pub const fn as_secs(self) -> i64 {
        match self {
            Unit::Seconds => 1,
            Unit::Minutes => 60,
            Unit::Hours => 60 * 60,
            Unit::Days => 24 * 60 * 60,
            Unit::Weeks => 7 * 24 * 60 * 60,
        }
    }
}

/// `now + amount * unit`, in unix seconds.
pub fn fixed_offset(now: i64, amount: i64, unit: Unit) -> i64 {
    now + amount * unit.as_secs()
}

/// Parses a timestamp into unix seconds, truncating sub-second precision.
///
/// A missing, empty or unparseable date yields `0`: due dates are optional
/// and must never block record creation.
pub fn from_date_field(date: Option<&str>) -> i64 {
    match date.map(str::trim) {
        Some(date) if !date.is_empty() => parse_timestamp(date).unwrap_or(0),
        _ => 0,
    }
}

/// Like [`from_date_field`], but also accepts a number of epoch
/// milliseconds, floored to whole seconds. Other value types yield `0`.
pub fn from_date_value(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::String(date)) => from_date_field(Some(date)),
        Some(Value::Number(millis)) => millis
            .as_i64()
            .map(|millis| millis.div_euclid(1000))
            .or_else(|| millis.as_f64().map(|millis| (millis / 1000.0).floor() as i64))
            .unwrap_or(0),
        _ => 0,
    }
}

fn parse_timestamp(date: &str) -> Option<i64> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Some(parsed.timestamp());
    }

    // Offsets without a colon, e.g. `2018-05-01T12:00:00+0100`
    if let Ok(parsed) = DateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(parsed.timestamp());
    }

    // No offset at all is read as UTC
    if let Ok(parsed) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S") {
        return Some(parsed.and_utc().timestamp());
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp())
}
