//! Calendar descriptions: a serde-readable form of a [`Calendar`].
//!
//! ```json
//! {
//!   "default": { "opening": "09:00", "closing": "15:00" },
//!   "weekdays": { "friday": { "opening": "10:00", "closing": "17:00" } },
//!   "dates": { "2010-12-24": { "opening": "8:00", "closing": "13:00" } },
//!   "closed_weekdays": ["sunday", "wednesday"],
//!   "closed_dates": ["2010-12-25"]
//! }
//! ```
//!
//! Sections are applied in the order above, so a closure wins over hours given
//! for the same weekday or date.

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::Deserialize;

use crate::calendar::Calendar;
use crate::error::{DeadlineError, Result};
use crate::window::WorkingWindow;

/// Opening and closing times, both `H:mm`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HoursConfig {
    pub opening: String,
    pub closing: String,
}

impl HoursConfig {
    fn to_window(&self) -> Result<WorkingWindow> {
        WorkingWindow::parse_open(&self.opening, &self.closing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    /// Hours for every weekday not listed in `weekdays`.
    pub default: HoursConfig,

    /// Per-weekday hours, keyed by English weekday name.
    #[serde(default)]
    pub weekdays: BTreeMap<String, HoursConfig>,

    /// Per-date hours, keyed by `yyyy-MM-dd`.
    #[serde(default)]
    pub dates: BTreeMap<String, HoursConfig>,

    #[serde(default)]
    pub closed_weekdays: Vec<String>,

    #[serde(default)]
    pub closed_dates: Vec<String>,
}

impl CalendarConfig {
    /// Parse a JSON calendar description.
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineError::Config`] for malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DeadlineError::Config(e.to_string()))
    }

    /// Build the described calendar.
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineError::Config`] for an unknown weekday name, and
    /// [`DeadlineError::Parse`] / [`DeadlineError::InvalidWindow`] for bad dates
    /// or hours.
    pub fn build(&self) -> Result<Calendar> {
        let mut calendar = Calendar::new(self.default.to_window()?);

        for (name, hours) in &self.weekdays {
            calendar.set_weekday_window(parse_weekday(name)?, hours.to_window()?);
        }
        for (date, hours) in &self.dates {
            calendar.set_date_hours(date, &hours.opening, &hours.closing)?;
        }

        let closed = self
            .closed_weekdays
            .iter()
            .map(|name| parse_weekday(name))
            .collect::<Result<Vec<_>>>()?;
        calendar.set_weekdays_closed(&closed);
        calendar.set_dates_closed(&self.closed_dates)?;

        Ok(calendar)
    }
}

/// Parse an English weekday name, long or short, in any case.
fn parse_weekday(name: &str) -> Result<Weekday> {
    name.trim()
        .parse::<Weekday>()
        .map_err(|_| DeadlineError::Config(format!("unknown weekday '{name}'")))
}
