//! Settings of a single conversion run.

use std::path::{Path, PathBuf};

pub static SCHEDULES_PATTERN: &str = "schedules/pickup-schedule-*.csv";
pub static OUTPUT_DIR: &str = "output";
static CSV_DIR: &str = "csv";
static ICS_DIR: &str = "ics";

/// The configuration is built once at startup and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// glob pattern of the schedule files
    pub schedules: String,
    /// root of the `csv` and `ics` output directories
    pub output_dir: PathBuf,
    /// skip writing CSV calendars
    pub exclude_csv: bool,
    /// skip writing iCalendar files
    pub exclude_ics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedules: String::from(SCHEDULES_PATTERN),
            output_dir: PathBuf::from(OUTPUT_DIR),
            exclude_csv: false,
            exclude_ics: false,
        }
    }
}

impl Config {
    pub fn csv_dir(&self) -> PathBuf {
        self.output_dir.join(CSV_DIR)
    }

    pub fn ics_dir(&self) -> PathBuf {
        self.output_dir.join(ICS_DIR)
    }
}

/// The output file of a calendar, e.g. `output/csv/MondayNight.csv`.
pub fn calendar_path(dir: &Path, calendar: &str, extension: &str) -> PathBuf {
    dir.join(format!("{calendar}.{extension}"))
}
