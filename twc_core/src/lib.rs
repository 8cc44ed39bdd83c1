//! This crate converts Toronto's waste pickup schedules into calendars.
//!
//! The schedules are the CSV exports of the City of Toronto Open Data portal.
//! Every calendar found in them is written as a CSV file for calendar imports and as an iCalendar file.

pub use ical;

pub mod config;
pub mod csv_calendar;
pub mod error;
pub mod ics_calendar;
pub mod pickup;
pub mod pipeline;
pub mod schedule;

pub use config::Config;
pub use error::{Error, RecordError};
pub use pickup::{Pickup, WasteStream};
pub use schedule::{CalendarGroup, Schedule};
