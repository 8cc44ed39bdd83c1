//! This module writes calendars as CSV files which calendar applications can import.

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    config::calendar_path,
    error::{Error, Result},
    pickup::Pickup,
    schedule::{CalendarGroup, Schedule},
};

static HEADER: [&str; 4] = ["Subject", "Start Date", "All Day Event", "Description"];
static FORMAT: &str = "%m-%d-%y";
static ALL_DAY_EVENT: &str = "TRUE";
static EXTENSION: &str = "csv";

/// Write one CSV file per calendar into `dir` and return the written paths.
pub fn write_all(schedule: &Schedule, dir: &Path) -> Result<Vec<PathBuf>> {
    info!("Writing CSV calendars");
    let mut paths = vec![];
    for group in schedule {
        paths.push(write_calendar(group, dir)?);
    }
    info!("Finished writing CSV calendars");
    Ok(paths)
}

/// Write the CSV file of a single calendar, an existing file is overwritten.
pub fn write_calendar(group: &CalendarGroup, dir: &Path) -> Result<PathBuf> {
    info!("Writing {} CSV", group.calendar);
    let path = calendar_path(dir, &group.calendar, EXTENSION);
    let file = File::create(&path).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    write(file, &group.pickups).map_err(|source| Error::Csv {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Write the header and one row per pickup.
pub fn write<W: Write>(writer: W, pickups: &[Pickup]) -> csv::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for pickup in pickups {
        csv_writer.write_record(row(pickup))?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn row(pickup: &Pickup) -> [String; 4] {
    [
        pickup.subject(),
        pickup.day.format(FORMAT).to_string(),
        String::from(ALL_DAY_EVENT),
        format!("{} - See {}", pickup.description(), pickup.url()),
    ]
}
