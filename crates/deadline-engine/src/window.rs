//! A single day's working window: closed, or open between two times of day.

use std::fmt;

use chrono::NaiveTime;
use serde::Serialize;

use crate::error::{DeadlineError, Result};
use crate::format::parse_time;

/// Opening and closing times of an open day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct Hours {
    opening: NaiveTime,
    closing: NaiveTime,
}

/// One day's status. Immutable once built.
///
/// An open window always has `closing` strictly after `opening`; the only way
/// to build one is [`WorkingWindow::open`] (or [`WorkingWindow::parse_open`]),
/// which enforces that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkingWindow {
    #[serde(flatten)]
    hours: Option<Hours>,
}

impl WorkingWindow {
    /// An open window from `opening` to `closing`.
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineError::InvalidWindow`] unless `closing` is strictly
    /// after `opening`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveTime;
    /// use deadline_engine::WorkingWindow;
    ///
    /// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    /// let three = NaiveTime::from_hms_opt(15, 0, 0).unwrap();
    /// let window = WorkingWindow::open(nine, three).unwrap();
    /// assert_eq!(window.duration_seconds(), 6 * 3600);
    ///
    /// assert!(WorkingWindow::open(three, nine).is_err());
    /// ```
    pub fn open(opening: NaiveTime, closing: NaiveTime) -> Result<Self> {
        if closing <= opening {
            return Err(DeadlineError::InvalidWindow(format!(
                "closing time {} must be after opening time {}",
                closing.format("%H:%M"),
                opening.format("%H:%M")
            )));
        }
        Ok(Self {
            hours: Some(Hours { opening, closing }),
        })
    }

    /// Parse two `H:mm` strings and build an open window from them.
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineError::Parse`] if either string is malformed, or
    /// [`DeadlineError::InvalidWindow`] if the times are equal or inverted.
    pub fn parse_open(opening: &str, closing: &str) -> Result<Self> {
        let opening = parse_time(opening)?;
        let closing = parse_time(closing)?;
        Self::open(opening, closing)
    }

    /// A closed day.
    pub const fn closed() -> Self {
        Self { hours: None }
    }

    pub fn is_open(&self) -> bool {
        self.hours.is_some()
    }

    pub fn opening_time(&self) -> Option<NaiveTime> {
        self.hours.map(|h| h.opening)
    }

    pub fn closing_time(&self) -> Option<NaiveTime> {
        self.hours.map(|h| h.closing)
    }

    /// Working seconds in this window; 0 when closed.
    pub fn duration_seconds(&self) -> i64 {
        self.hours
            .map(|h| (h.closing - h.opening).num_seconds())
            .unwrap_or(0)
    }
}

impl fmt::Display for WorkingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hours {
            Some(h) => write!(
                f,
                "{}-{}",
                h.opening.format("%H:%M"),
                h.closing.format("%H:%M")
            ),
            None => f.write_str("closed"),
        }
    }
}
