//! Deadline computation over a [`Calendar`].
//!
//! A duration is spent against successive working windows. The first day
//! offers the time from the (possibly clamped) start until closing; every later
//! day offers its full working duration, because work resumes at opening time.
//! Closed days offer nothing and are stepped over. The rollover gives up after
//! [`PROCESSING_DAYS_LIMIT`] calendar days.

use std::fmt;

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;
use tracing::{debug, warn};

use crate::calendar::{Calendar, CalendarSnapshot};
use crate::error::{DeadlineError, Result};
use crate::format::parse_datetime;

/// Calendar days the rollover may advance before giving up.
pub const PROCESSING_DAYS_LIMIT: u32 = 365;

/// The outcome of a deadline computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadlineInfo {
    /// The requested start, echoed back.
    pub start: NaiveDateTime,
    /// The start after clamping to opening time on a working day.
    pub effective_start: NaiveDateTime,
    /// When the requested working time is used up.
    pub deadline: NaiveDateTime,
    /// Calendar days between the start date and the deadline date.
    pub days_advanced: u32,
    /// The requested working time in seconds.
    pub duration_seconds: u32,
}

/// Compute the deadline for `duration_seconds` of work starting at `start`.
///
/// # Errors
///
/// Returns [`DeadlineError::ProcessingLimitExceeded`] if the work cannot be
/// finished within [`PROCESSING_DAYS_LIMIT`] calendar days, or
/// [`DeadlineError::OutOfRange`] if the rollover runs off the calendar.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use deadline_engine::{calculate_deadline, format, Calendar};
///
/// let mut calendar = Calendar::with_default_hours("09:00", "15:00").unwrap();
/// calendar.set_weekdays_closed(&[Weekday::Wed]);
///
/// // Tuesday 14:48, twelve minutes before closing; Wednesday is closed.
/// let start = format::parse_datetime("2010-06-08 14:48").unwrap();
/// let deadline = calculate_deadline(&calendar, 15 * 60, start).unwrap();
/// assert_eq!(format::format_deadline(&deadline), "2010-06-10 09:03:00");
/// ```
pub fn calculate_deadline(
    calendar: &Calendar,
    duration_seconds: u32,
    start: NaiveDateTime,
) -> Result<NaiveDateTime> {
    calculate(calendar, duration_seconds, start).map(|info| info.deadline)
}

/// Like [`calculate_deadline`], returning the full [`DeadlineInfo`].
///
/// # Errors
///
/// Same as [`calculate_deadline`].
pub fn calculate(
    calendar: &Calendar,
    duration_seconds: u32,
    start: NaiveDateTime,
) -> Result<DeadlineInfo> {
    let date = start.date();
    let mut time = start.time();

    // Only a working day clamps; on any other day the first capacity is zero
    // or negative and the rollover moves on.
    if calendar.is_working_day(date) {
        if let Some(opening) = calendar.opening_time(date) {
            if time < opening {
                time = opening;
            }
        }
    }
    let effective_start = date.and_time(time);

    let mut days_advanced: u32 = 0;
    let mut remaining = i64::from(duration_seconds);
    let mut capacity = calendar.seconds_until_closing(time, date);

    while remaining > capacity {
        days_advanced += 1;
        if days_advanced == PROCESSING_DAYS_LIMIT {
            warn!(
                %start,
                duration_seconds,
                remaining,
                "no deadline within {PROCESSING_DAYS_LIMIT} days"
            );
            return Err(DeadlineError::ProcessingLimitExceeded(PROCESSING_DAYS_LIMIT));
        }
        remaining -= capacity;

        let next = advance(date, days_advanced)?;
        capacity = calendar.working_seconds_per_day(next);
        // A day without an opening time has zero capacity and cannot end the
        // rollover, so the cursor only needs updating on days that have one.
        if let Some(opening) = calendar.opening_time(next) {
            time = opening;
        }
        debug!(%next, remaining, capacity, "rolled over");
    }

    let deadline = advance(date, days_advanced)?
        .and_time(time)
        .checked_add_signed(Duration::seconds(remaining))
        .ok_or_else(|| DeadlineError::OutOfRange(format!("deadline after {start}")))?;

    debug!(%start, %effective_start, %deadline, days_advanced, "deadline computed");

    Ok(DeadlineInfo {
        start,
        effective_start,
        deadline,
        days_advanced,
        duration_seconds,
    })
}

fn advance(date: NaiveDate, days: u32) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| DeadlineError::OutOfRange(format!("{days} days after {date}")))
}

// ── String-level facade ─────────────────────────────────────────────────────

/// A calendar plus the deadline operation, driven by `H:mm` / `yyyy-MM-dd`
/// strings.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use deadline_engine::DeadlineCalculator;
///
/// let mut calc = DeadlineCalculator::new("09:00", "15:00").unwrap();
/// calc.set_weekday_hours(Weekday::Fri, "10:00", "17:00").unwrap();
/// calc.set_date_hours("2010-12-24", "8:00", "13:00").unwrap();
/// calc.set_closed_weekdays(&[Weekday::Sun, Weekday::Wed]);
/// calc.set_closed_dates(&["2010-12-25"]).unwrap();
///
/// let deadline = calc.calculate_deadline(7 * 60 * 60, "2010-12-24 6:45").unwrap();
/// assert_eq!(deadline.to_string(), "2010-12-27 11:00:00");
/// ```
#[derive(Debug, Clone)]
pub struct DeadlineCalculator {
    calendar: Calendar,
}

impl DeadlineCalculator {
    /// A calculator open from `default_opening` to `default_closing` on all
    /// seven weekdays.
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineError::Parse`] or [`DeadlineError::InvalidWindow`].
    pub fn new(default_opening: &str, default_closing: &str) -> Result<Self> {
        Ok(Self::from_calendar(Calendar::with_default_hours(
            default_opening,
            default_closing,
        )?))
    }

    pub fn from_calendar(calendar: Calendar) -> Self {
        Self { calendar }
    }

    pub fn set_weekday_hours(
        &mut self,
        weekday: Weekday,
        opening: &str,
        closing: &str,
    ) -> Result<()> {
        self.calendar.set_weekday_hours(weekday, opening, closing)
    }

    pub fn set_date_hours(&mut self, date: &str, opening: &str, closing: &str) -> Result<()> {
        self.calendar.set_date_hours(date, opening, closing)
    }

    pub fn set_closed_weekdays(&mut self, weekdays: &[Weekday]) {
        self.calendar.set_weekdays_closed(weekdays);
    }

    pub fn set_closed_dates<S: AsRef<str>>(&mut self, dates: &[S]) -> Result<()> {
        self.calendar.set_dates_closed(dates)
    }

    /// Deadline for `duration_seconds` of work from a `yyyy-MM-dd H:mm` start.
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineError::Parse`] for a malformed start, otherwise the
    /// errors of [`calculate_deadline`].
    pub fn calculate_deadline(
        &self,
        duration_seconds: u32,
        start: &str,
    ) -> Result<NaiveDateTime> {
        let start = parse_datetime(start)?;
        calculate_deadline(&self.calendar, duration_seconds, start)
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn calendar_mut(&mut self) -> &mut Calendar {
        &mut self.calendar
    }

    pub fn snapshot(&self) -> CalendarSnapshot {
        self.calendar.snapshot()
    }
}

impl fmt::Display for DeadlineCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.calendar, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_deadline;

    fn shop() -> DeadlineCalculator {
        let mut calc = DeadlineCalculator::new("09:00", "15:00").unwrap();
        calc.set_weekday_hours(Weekday::Fri, "10:00", "17:00").unwrap();
        calc.set_date_hours("2010-12-24", "8:00", "13:00").unwrap();
        calc.set_closed_weekdays(&[Weekday::Sun, Weekday::Wed]);
        calc.set_closed_dates(&["2010-12-25"]).unwrap();
        calc
    }

    fn deadline(calc: &DeadlineCalculator, seconds: u32, start: &str) -> String {
        format_deadline(&calc.calculate_deadline(seconds, start).unwrap())
    }

    #[test]
    fn test_finishes_same_day() {
        assert_eq!(deadline(&shop(), 2 * 60 * 60, "2010-06-07 09:10"), "2010-06-07 11:10:00");
    }

    #[test]
    fn test_skips_closed_weekday() {
        assert_eq!(deadline(&shop(), 15 * 60, "2010-06-08 14:48"), "2010-06-10 09:03:00");
    }

    #[test]
    fn test_clamps_and_skips_closed_date_and_weekday() {
        assert_eq!(deadline(&shop(), 7 * 60 * 60, "2010-12-24 6:45"), "2010-12-27 11:00:00");
    }

    #[test]
    fn test_start_on_closed_day() {
        // 2010-12-22 is a Wednesday
        assert_eq!(deadline(&shop(), 60 * 60, "2010-12-22 12:00"), "2010-12-23 10:00:00");
    }

    #[test]
    fn test_finishing_exactly_at_closing_stays_on_same_day() {
        assert_eq!(deadline(&shop(), 6 * 60 * 60, "2010-06-07 9:00"), "2010-06-07 15:00:00");
        assert_eq!(deadline(&shop(), 6 * 60 * 60 + 1, "2010-06-07 9:00"), "2010-06-08 09:00:01");
    }

    #[test]
    fn test_zero_duration_returns_clamped_start() {
        assert_eq!(deadline(&shop(), 0, "2010-06-07 7:30"), "2010-06-07 09:00:00");
        assert_eq!(deadline(&shop(), 0, "2010-06-07 10:30"), "2010-06-07 10:30:00");
    }

    #[test]
    fn test_start_after_closing_carries_overrun() {
        // Monday 16:00 is a working day past closing: the first capacity is
        // -3600, so the hour past closing is added to the remaining work.
        assert_eq!(deadline(&shop(), 60 * 60, "2010-06-07 16:00"), "2010-06-08 11:00:00");
    }

    #[test]
    fn test_closed_override_day_uses_weekday_closing() {
        // 2010-12-25 is closed by override but Saturdays default to 09:00-15:00.
        // No clamp applies (not a working day) and capacity is measured to the
        // weekday closing time.
        let calc = shop();
        assert_eq!(deadline(&calc, 30 * 60, "2010-12-25 14:00"), "2010-12-25 14:30:00");
        // Two hours: one on 12-25, then 12-26 (Sunday) closed, then Monday.
        assert_eq!(deadline(&calc, 2 * 60 * 60, "2010-12-25 14:00"), "2010-12-27 10:00:00");
    }

    #[test]
    fn test_all_weekdays_closed_hits_limit() {
        let mut calc = shop();
        calc.set_closed_weekdays(&[
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]);
        let err = calc.calculate_deadline(7 * 60 * 60, "2010-12-24 6:45").unwrap_err();
        assert_eq!(err, DeadlineError::ProcessingLimitExceeded(PROCESSING_DAYS_LIMIT));
    }

    #[test]
    fn test_open_override_rescues_closed_week() {
        let mut calc = DeadlineCalculator::new("09:00", "15:00").unwrap();
        calc.set_closed_weekdays(&[
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]);
        calc.set_date_hours("2011-03-01", "10:00", "11:00").unwrap();
        assert_eq!(deadline(&calc, 1800, "2011-01-15 9:00"), "2011-03-01 10:30:00");
    }

    #[test]
    fn test_limit_counts_calendar_days() {
        let mut calc = DeadlineCalculator::new("09:00", "10:00").unwrap();
        // 364 working hours from the start of 2011-01-01: the last hour is on
        // day 363 after the start, within the limit.
        assert_eq!(
            deadline(&calc, 364 * 3600, "2011-01-01 9:00"),
            "2011-12-30 10:00:00"
        );
        // One more hour needs day 364 and is still allowed; another needs 365.
        assert_eq!(
            deadline(&calc, 365 * 3600, "2011-01-01 9:00"),
            "2011-12-31 10:00:00"
        );
        let err = calc
            .calculate_deadline(366 * 3600, "2011-01-01 9:00")
            .unwrap_err();
        assert!(matches!(err, DeadlineError::ProcessingLimitExceeded(_)));

        calc.set_closed_dates(&["2011-06-01"]).unwrap();
        let err = calc
            .calculate_deadline(365 * 3600, "2011-01-01 9:00")
            .unwrap_err();
        assert!(matches!(err, DeadlineError::ProcessingLimitExceeded(_)));
    }

    #[test]
    fn test_info_reports_effective_start_and_days() {
        let calc = shop();
        let start = parse_datetime("2010-12-24 6:45").unwrap();
        let info = calculate(calc.calendar(), 7 * 60 * 60, start).unwrap();
        assert_eq!(info.start, start);
        assert_eq!(info.effective_start, parse_datetime("2010-12-24 8:00").unwrap());
        assert_eq!(info.days_advanced, 3);
        assert_eq!(info.duration_seconds, 25_200);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["deadline"], "2010-12-27T11:00:00");
    }

    #[test]
    fn test_malformed_start_is_parse_error() {
        let err = shop().calculate_deadline(60, "2010-12-24").unwrap_err();
        assert!(matches!(err, DeadlineError::Parse(_)));
    }

    #[test]
    fn test_display_delegates_to_calendar() {
        let calc = shop();
        assert_eq!(calc.to_string(), calc.calendar().to_string());
    }
}
