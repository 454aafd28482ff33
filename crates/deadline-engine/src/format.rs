//! Text boundary for dates, times and date-times.
//!
//! All values are local wall-clock values with minute precision on input and
//! second precision on output:
//!
//! - time of day: `H:mm` (24-hour, leading zero on the hour optional)
//! - date: `yyyy-MM-dd`
//! - date-time: `yyyy-MM-dd H:mm`

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{DeadlineError, Result};

const TIME_FORMAT: &str = "%H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a time of day such as `"9:00"` or `"17:30"`.
///
/// # Errors
///
/// Returns [`DeadlineError::Parse`] if the string is not a valid `H:mm` time.
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    if !is_time_shape(s) {
        return Err(mismatch("time", s, "H:mm"));
    }
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .map_err(|e| DeadlineError::Parse(format!("time '{s}' (expected H:mm): {e}")))
}

/// Parse a calendar date such as `"2010-12-24"`.
///
/// # Errors
///
/// Returns [`DeadlineError::Parse`] if the string is not a valid `yyyy-MM-dd` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    if !is_date_shape(s) {
        return Err(mismatch("date", s, "yyyy-MM-dd"));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| DeadlineError::Parse(format!("date '{s}' (expected yyyy-MM-dd): {e}")))
}

/// Parse a local date-time such as `"2010-12-24 6:45"`.
///
/// # Errors
///
/// Returns [`DeadlineError::Parse`] if the string is not a valid
/// `yyyy-MM-dd H:mm` date-time.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let shaped = s
        .split_once(' ')
        .is_some_and(|(date, time)| is_date_shape(date) && is_time_shape(time));
    if !shaped {
        return Err(mismatch("date-time", s, "yyyy-MM-dd H:mm"));
    }
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).map_err(|e| {
        DeadlineError::Parse(format!("date-time '{s}' (expected yyyy-MM-dd H:mm): {e}"))
    })
}

// chrono accepts signs, padding and short fields; the formats above do not.

/// `H:mm`: one or two hour digits, a colon, exactly two minute digits.
fn is_time_shape(s: &str) -> bool {
    s.split_once(':')
        .is_some_and(|(hour, minute)| is_digits(hour, 1, 2) && is_digits(minute, 2, 2))
}

/// `yyyy-MM-dd`: four, two and two digits separated by dashes.
fn is_date_shape(s: &str) -> bool {
    let mut fields = s.split('-');
    let shaped = [4, 2, 2]
        .iter()
        .all(|&width| fields.next().is_some_and(|f| is_digits(f, width, width)));
    shaped && fields.next().is_none()
}

fn is_digits(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

fn mismatch(what: &str, s: &str, expected: &str) -> DeadlineError {
    DeadlineError::Parse(format!("{what} '{s}' (expected {expected})"))
}

/// Format a deadline as `yyyy-MM-dd HH:mm:ss`.
pub fn format_deadline(dt: &NaiveDateTime) -> String {
    dt.format(DEADLINE_FORMAT).to_string()
}
