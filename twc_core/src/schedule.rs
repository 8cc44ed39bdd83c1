//! This module reads the schedule exports and groups their pickups by calendar.

use std::{
    collections::HashMap,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    error::{Error, RecordError, Result},
    pickup::{Pickup, FIELD_COUNT},
};

/// All pickups of one calendar in the order they were read.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGroup {
    pub calendar: String,
    pub pickups: Vec<Pickup>,
}

/// Calendars in order of their first appearance.
///
/// Pickups are never re-sorted, a calendar keeps the file order and then the row order of its input.
#[derive(Debug, Default)]
pub struct Schedule {
    groups: Vec<CalendarGroup>,
    index: HashMap<String, usize>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pickup to the group of its calendar.
    pub fn push(&mut self, pickup: Pickup) {
        match self.index.get(&pickup.calendar) {
            Some(&position) => self.groups[position].pickups.push(pickup),
            None => {
                self.index
                    .insert(pickup.calendar.clone(), self.groups.len());
                self.groups.push(CalendarGroup {
                    calendar: pickup.calendar.clone(),
                    pickups: vec![pickup],
                });
            }
        }
    }

    pub fn get(&self, calendar: &str) -> Option<&CalendarGroup> {
        self.index
            .get(calendar)
            .and_then(|&position| self.groups.get(position))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CalendarGroup> {
        self.groups.iter()
    }

    pub fn calendars(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.calendar.as_str())
    }

    /// Number of calendars.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of pickups over all calendars.
    pub fn pickup_count(&self) -> usize {
        self.groups.iter().map(|group| group.pickups.len()).sum()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a CalendarGroup;
    type IntoIter = std::slice::Iter<'a, CalendarGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Pickup> for Schedule {
    fn from_iter<T: IntoIterator<Item = Pickup>>(iter: T) -> Self {
        let mut schedule = Self::new();
        for pickup in iter {
            schedule.push(pickup);
        }
        schedule
    }
}

/// Read every schedule file matching the glob `pattern`.
///
/// Files are processed in sorted order. No matching file results in an empty schedule.
pub fn load(pattern: &str) -> Result<Schedule> {
    info!("Parsing City of Toronto Open Data");
    let mut paths = glob::glob(pattern)?.collect::<std::result::Result<Vec<PathBuf>, _>>()?;
    paths.sort();
    let mut schedule = Schedule::new();
    for path in paths {
        read_file(&path, &mut schedule)?;
    }
    debug!(
        calendars = schedule.len(),
        pickups = schedule.pickup_count(),
        "parsed schedules"
    );
    Ok(schedule)
}

/// Read a single schedule file into `schedule`.
pub fn read_file(path: &Path, schedule: &mut Schedule) -> Result<()> {
    info!("Parsing {}", path.display());
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read(file, path, schedule)
}

/// Read schedule rows after the header line, `path` only names the source in errors.
///
/// Every line after the header must be a row, an empty line is a malformed row.
pub fn read<R: Read>(mut reader: R, path: &Path, schedule: &mut Schedule) -> Result<()> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let blank_line = first_blank_line(&text);
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    for record_result in csv_reader.records() {
        let record = record_result.map_err(|source| Error::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map_or(0, |position| position.line());
        if let Some(blank_line) = blank_line.filter(|blank_line| line >= *blank_line) {
            return Err(blank_row(path, blank_line));
        }
        let fields: Vec<&str> = record.iter().collect();
        let pickup = Pickup::from_row(&fields).map_err(|source| Error::Record {
            path: path.to_path_buf(),
            line,
            source,
        })?;
        schedule.push(pickup);
    }
    match blank_line {
        Some(blank_line) => Err(blank_row(path, blank_line)),
        None => Ok(()),
    }
}

/// Get the first empty line after the header.
///
/// Line breaks inside quoted fields do not end a row.
fn first_blank_line(text: &str) -> Option<u64> {
    let mut quoted = false;
    for (index, line) in text.lines().enumerate() {
        if index > 0 && !quoted && line.is_empty() {
            return Some(index as u64 + 1);
        }
        if line.matches('"').count() % 2 == 1 {
            quoted = !quoted;
        }
    }
    None
}

fn blank_row(path: &Path, line: u64) -> Error {
    Error::Record {
        path: path.to_path_buf(),
        line,
        source: RecordError::MalformedRow {
            expected: FIELD_COUNT,
            found: 0,
        },
    }
}
