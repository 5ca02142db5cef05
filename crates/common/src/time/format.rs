//! Wall-clock formatting and arithmetic
//!
//! Chrono-based helpers for the date shapes services exchange: pattern
//! constants, epoch-millisecond conversion, additive arithmetic, truncation
//! to day/hour boundaries, and expiry comparison. Formatting patterns use
//! strftime syntax.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};

/// Year only, e.g. `2024`.
pub const PATTERN_YEAR: &str = "%Y";
/// Calendar date, e.g. `2024-03-01`.
pub const PATTERN_DATE: &str = "%Y-%m-%d";
/// Date and time to the second.
pub const PATTERN_DATETIME: &str = "%Y-%m-%d %H:%M:%S";
/// Date and time with milliseconds.
pub const PATTERN_FULL: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn current_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current wall-clock time in seconds since the Unix epoch.
pub fn current_unix_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// The UTC datetime for an epoch-millisecond value, when representable.
pub fn from_epoch_millis(millis: i64) -> Option<NaiveDateTime> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|datetime| datetime.naive_utc())
}

/// Epoch milliseconds for a UTC datetime.
pub fn to_epoch_millis(datetime: &NaiveDateTime) -> i64 {
    datetime.and_utc().timestamp_millis()
}

/// Format a datetime with a strftime pattern (see the `PATTERN_*`
/// constants).
pub fn format_datetime(datetime: &NaiveDateTime, pattern: &str) -> String {
    datetime.format(pattern).to_string()
}

/// Format a date with a strftime pattern.
pub fn format_date(date: &NaiveDate, pattern: &str) -> String {
    date.format(pattern).to_string()
}

/// Parse a datetime with a strftime pattern.
///
/// # Errors
/// Returns the parse error when `text` does not match `pattern`.
pub fn parse_datetime(text: &str, pattern: &str) -> chrono::ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, pattern)
}

/// Parse a date with a strftime pattern.
///
/// # Errors
/// Returns the parse error when `text` does not match `pattern`.
pub fn parse_date(text: &str, pattern: &str) -> chrono::ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(text, pattern)
}

/// Add days, `None` on overflow.
pub fn add_days(datetime: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    datetime.checked_add_signed(TimeDelta::days(days))
}

/// Add hours, `None` on overflow.
pub fn add_hours(datetime: NaiveDateTime, hours: i64) -> Option<NaiveDateTime> {
    datetime.checked_add_signed(TimeDelta::hours(hours))
}

/// Whole days from `start` to `end` (negative when `end` is earlier).
pub fn diff_in_days(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_days()
}

/// Milliseconds from `start` to `end` (negative when `end` is earlier).
pub fn diff_in_millis(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_milliseconds()
}

/// Midnight at the start of the datetime's day.
pub fn start_of_day(datetime: NaiveDateTime) -> NaiveDateTime {
    datetime.date().and_time(NaiveTime::MIN)
}

/// The last representable millisecond of the datetime's day.
pub fn end_of_day(datetime: NaiveDateTime) -> NaiveDateTime {
    start_of_day(datetime) + TimeDelta::days(1) - TimeDelta::milliseconds(1)
}

/// The datetime truncated to the start of its hour.
pub fn start_of_hour(datetime: NaiveDateTime) -> NaiveDateTime {
    let time = NaiveTime::from_hms_opt(datetime.hour(), 0, 0).unwrap_or(NaiveTime::MIN);
    datetime.date().and_time(time)
}

/// Shift a `yyyymm` year-month value by a number of months.
///
/// ```
/// use keystone_common::time::format::offset_year_month;
///
/// assert_eq!(offset_year_month(202201, 13), 202302);
/// assert_eq!(offset_year_month(202201, -1), 202112);
/// ```
pub fn offset_year_month(year_month: i32, offset_months: i32) -> i32 {
    let year = year_month / 100;
    let month = year_month % 100;
    let total = year * 12 + (month - 1) + offset_months;
    (total / 12) * 100 + total % 12 + 1
}

/// Whether a deadline in epoch milliseconds has passed.
pub fn is_expired(expire_at_millis: i64) -> bool {
    is_expired_at(expire_at_millis, current_millis())
}

/// Whether a deadline has passed at the supplied instant. The deadline
/// itself is not yet expired.
pub fn is_expired_at(expire_at_millis: i64, now_millis: i64) -> bool {
    now_millis > expire_at_millis
}

#[cfg(test)]
mod tests {
    //! Unit tests for time::format.
    use super::*;

    fn sample() -> NaiveDateTime {
        parse_datetime("2024-03-01 13:45:30", PATTERN_DATETIME).unwrap()
    }

    #[test]
    fn test_format_patterns() {
        let datetime = sample();

        assert_eq!(format_datetime(&datetime, PATTERN_DATETIME), "2024-03-01 13:45:30");
        assert_eq!(format_datetime(&datetime, PATTERN_DATE), "2024-03-01");
        assert_eq!(format_datetime(&datetime, PATTERN_YEAR), "2024");
        assert_eq!(format_datetime(&datetime, PATTERN_FULL), "2024-03-01 13:45:30.000");
        assert_eq!(format_date(&datetime.date(), PATTERN_DATE), "2024-03-01");
    }

    #[test]
    fn test_parse_round_trip_and_errors() {
        let datetime = sample();
        let text = format_datetime(&datetime, PATTERN_DATETIME);
        assert_eq!(parse_datetime(&text, PATTERN_DATETIME).unwrap(), datetime);

        assert!(parse_datetime("not a date", PATTERN_DATETIME).is_err());
        assert!(parse_date("2024-13-01", PATTERN_DATE).is_err());
    }

    #[test]
    fn test_epoch_millis_round_trip() {
        let datetime = sample();
        let millis = to_epoch_millis(&datetime);
        assert_eq!(from_epoch_millis(millis).unwrap(), datetime);
    }

    #[test]
    fn test_additive_arithmetic() {
        let datetime = sample();

        assert_eq!(
            format_datetime(&add_days(datetime, 31).unwrap(), PATTERN_DATE),
            "2024-04-01"
        );
        assert_eq!(
            format_datetime(&add_hours(datetime, -14).unwrap(), PATTERN_DATETIME),
            "2024-02-29 23:45:30"
        );
    }

    #[test]
    fn test_diffs() {
        let start = sample();
        let end = add_days(start, 2).unwrap();

        assert_eq!(diff_in_days(start, end), 2);
        assert_eq!(diff_in_days(end, start), -2);
        assert_eq!(diff_in_millis(start, add_hours(start, 1).unwrap()), 3_600_000);
    }

    #[test]
    fn test_truncation() {
        let datetime = sample();

        assert_eq!(format_datetime(&start_of_day(datetime), PATTERN_DATETIME), "2024-03-01 00:00:00");
        assert_eq!(format_datetime(&start_of_hour(datetime), PATTERN_DATETIME), "2024-03-01 13:00:00");
        assert_eq!(format_datetime(&end_of_day(datetime), PATTERN_FULL), "2024-03-01 23:59:59.999");
    }

    #[test]
    fn test_offset_year_month() {
        assert_eq!(offset_year_month(202201, 0), 202201);
        assert_eq!(offset_year_month(202201, 11), 202212);
        assert_eq!(offset_year_month(202201, 12), 202301);
        assert_eq!(offset_year_month(202203, -3), 202112);
    }

    #[test]
    fn test_expiry_comparison() {
        assert!(is_expired_at(1000, 1001));
        assert!(!is_expired_at(1000, 1000)); // the deadline itself still lives
        assert!(!is_expired_at(1000, 999));
        assert!(is_expired(0));
    }
}
