//! Business calendar: weekday defaults plus per-date overrides.
//!
//! Every weekday always has a window (the table is a fixed seven-slot array
//! indexed from Monday). Date overrides are sparse and kept in date order.
//!
//! # Resolution
//!
//! Date overrides take precedence over weekday defaults, with one asymmetry:
//!
//! - [`Calendar::opening_time`] and [`Calendar::closing_time`] only honour an
//!   override that is **open**. A date explicitly closed falls back to the
//!   weekday default's times.
//! - [`Calendar::working_seconds_per_day`] honours any override, so an explicitly
//!   closed date reports 0.
//!
//! The rollover in [`crate::deadline`] depends on this: capacity reaches 0 on a
//! closed override date, and the opening time read for such a day is never used
//! because a zero-capacity day cannot end the rollover.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use tracing::trace;

use crate::error::Result;
use crate::format::parse_date;
use crate::window::WorkingWindow;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A business's operating calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    weekdays: [WorkingWindow; 7],
    overrides: BTreeMap<NaiveDate, WorkingWindow>,
}

impl Calendar {
    /// A calendar where every weekday uses `default` and no date is overridden.
    pub fn new(default: WorkingWindow) -> Self {
        Self {
            weekdays: [default; 7],
            overrides: BTreeMap::new(),
        }
    }

    /// A calendar open from `opening` to `closing` (both `H:mm`) every day.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DeadlineError::Parse`] for malformed times, or
    /// [`crate::DeadlineError::InvalidWindow`] unless closing is after opening.
    pub fn with_default_hours(opening: &str, closing: &str) -> Result<Self> {
        Ok(Self::new(WorkingWindow::parse_open(opening, closing)?))
    }

    // ── Mutators ────────────────────────────────────────────────────────────

    pub fn set_weekday_window(&mut self, weekday: Weekday, window: WorkingWindow) {
        self.weekdays[weekday.num_days_from_monday() as usize] = window;
    }

    pub fn set_date_window(&mut self, date: NaiveDate, window: WorkingWindow) {
        self.overrides.insert(date, window);
    }

    /// Replace the default hours of `weekday`.
    ///
    /// # Errors
    ///
    /// Same as [`WorkingWindow::parse_open`]. The calendar is unchanged on error.
    pub fn set_weekday_hours(
        &mut self,
        weekday: Weekday,
        opening: &str,
        closing: &str,
    ) -> Result<()> {
        let window = WorkingWindow::parse_open(opening, closing)?;
        self.set_weekday_window(weekday, window);
        Ok(())
    }

    /// Override the hours of a single `yyyy-MM-dd` date.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DeadlineError::Parse`] for a malformed date or time, or
    /// [`crate::DeadlineError::InvalidWindow`]. The calendar is unchanged on error.
    pub fn set_date_hours(&mut self, date: &str, opening: &str, closing: &str) -> Result<()> {
        let date = parse_date(date)?;
        let window = WorkingWindow::parse_open(opening, closing)?;
        self.set_date_window(date, window);
        Ok(())
    }

    pub fn set_weekdays_closed(&mut self, weekdays: &[Weekday]) {
        for &weekday in weekdays {
            self.set_weekday_window(weekday, WorkingWindow::closed());
        }
    }

    /// Mark `yyyy-MM-dd` dates as closed.
    ///
    /// Every date is parsed before any is stored, so a malformed entry leaves
    /// the calendar unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DeadlineError::Parse`] for the first malformed date.
    pub fn set_dates_closed<S: AsRef<str>>(&mut self, dates: &[S]) -> Result<()> {
        let parsed = dates
            .iter()
            .map(|d| parse_date(d.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        for date in parsed {
            self.set_date_window(date, WorkingWindow::closed());
        }
        Ok(())
    }

    // ── Inspection ──────────────────────────────────────────────────────────

    pub fn weekday_window(&self, weekday: Weekday) -> &WorkingWindow {
        &self.weekdays[weekday.num_days_from_monday() as usize]
    }

    pub fn date_override(&self, date: NaiveDate) -> Option<&WorkingWindow> {
        self.overrides.get(&date)
    }

    /// Date overrides in ascending date order.
    pub fn overrides(&self) -> impl Iterator<Item = (NaiveDate, &WorkingWindow)> + '_ {
        self.overrides.iter().map(|(d, w)| (*d, w))
    }

    /// An immutable copy that can be shared across threads while this
    /// calendar keeps being edited.
    pub fn snapshot(&self) -> CalendarSnapshot {
        CalendarSnapshot(Arc::new(self.clone()))
    }

    // ── Resolution ──────────────────────────────────────────────────────────

    /// Opening time on `date`: an open override's, else the weekday default's.
    pub fn opening_time(&self, date: NaiveDate) -> Option<NaiveTime> {
        self.open_override(date)
            .unwrap_or_else(|| self.weekday_window(date.weekday()))
            .opening_time()
    }

    /// Closing time on `date`: an open override's, else the weekday default's.
    pub fn closing_time(&self, date: NaiveDate) -> Option<NaiveTime> {
        self.open_override(date)
            .unwrap_or_else(|| self.weekday_window(date.weekday()))
            .closing_time()
    }

    /// Working seconds available on `date`. A closed override yields 0.
    pub fn working_seconds_per_day(&self, date: NaiveDate) -> i64 {
        self.date_override(date)
            .unwrap_or_else(|| self.weekday_window(date.weekday()))
            .duration_seconds()
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        self.working_seconds_per_day(date) > 0
    }

    /// Seconds from `time` to the resolved closing time on `date`, or 0 when no
    /// closing time resolves. Negative when `time` is past closing.
    pub fn seconds_until_closing(&self, time: NaiveTime, date: NaiveDate) -> i64 {
        self.closing_time(date)
            .map(|closing| (closing - time).num_seconds())
            .unwrap_or(0)
    }

    fn open_override(&self, date: NaiveDate) -> Option<&WorkingWindow> {
        match self.overrides.get(&date) {
            Some(window) if window.is_open() => Some(window),
            Some(_) => {
                trace!(%date, "closed override, falling back to weekday default times");
                None
            }
            None => None,
        }
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Schedule:")?;
        writeln!(f, "Week:")?;
        for weekday in WEEK {
            writeln!(f, "  {weekday}: {}", self.weekday_window(weekday))?;
        }
        write!(f, "Dates:")?;
        if self.overrides.is_empty() {
            write!(f, " none")?;
        }
        for (date, window) in &self.overrides {
            write!(f, "\n  {}: {window}", date.format("%Y-%m-%d"))?;
        }
        Ok(())
    }
}

/// Read-only, cheaply clonable copy of a [`Calendar`].
#[derive(Debug, Clone)]
pub struct CalendarSnapshot(Arc<Calendar>);

impl Deref for CalendarSnapshot {
    type Target = Calendar;

    fn deref(&self) -> &Calendar {
        &self.0
    }
}
