//! The conversion run: read all schedules, then write every calendar.

use std::path::PathBuf;

use tracing::info;

use crate::{config::Config, csv_calendar, error::Result, ics_calendar, schedule};

/// What a run has written.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub calendars: usize,
    pub pickups: usize,
    pub csv_files: Vec<PathBuf>,
    pub ics_files: Vec<PathBuf>,
}

/// Run the whole conversion.
///
/// The first error aborts the run, files written before it are kept.
pub fn run(config: &Config) -> Result<Summary> {
    let schedule = schedule::load(&config.schedules)?;
    let mut summary = Summary {
        calendars: schedule.len(),
        pickups: schedule.pickup_count(),
        ..Summary::default()
    };
    if !config.exclude_csv {
        summary.csv_files = csv_calendar::write_all(&schedule, &config.csv_dir())?;
    }
    if !config.exclude_ics {
        summary.ics_files = ics_calendar::write_all(&schedule, &config.ics_dir())?;
    }
    info!(
        calendars = summary.calendars,
        pickups = summary.pickups,
        files = summary.csv_files.len() + summary.ics_files.len(),
        "Finished"
    );
    Ok(summary)
}
