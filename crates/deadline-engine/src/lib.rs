//! # deadline-engine
//!
//! Deterministic business-hours deadline computation.
//!
//! Given a business calendar (default hours per weekday, per-date overrides and
//! closures) and a start moment, compute when a task of known duration is done.
//! All values are local wall-clock times with second granularity; there are no
//! time zones.
//!
//! ## Modules
//!
//! - [`window`] — One day's working window (open between two times, or closed)
//! - [`calendar`] — Weekday defaults plus date overrides, and their resolution
//! - [`deadline`] — The multi-day rollover and the string-level calculator
//! - [`config`] — JSON calendar descriptions
//! - [`format`] — Date, time and date-time text boundary
//! - [`error`] — Error types

pub mod calendar;
pub mod config;
pub mod deadline;
pub mod error;
pub mod format;
pub mod window;

pub use calendar::{Calendar, CalendarSnapshot};
pub use config::{CalendarConfig, HoursConfig};
pub use deadline::{
    calculate, calculate_deadline, DeadlineCalculator, DeadlineInfo, PROCESSING_DAYS_LIMIT,
};
pub use error::DeadlineError;
pub use window::WorkingWindow;
