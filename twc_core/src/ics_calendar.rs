//! This module writes calendars as iCalendar files.
//!
//! Every pickup becomes an all-day event. The content lines are emitted unfolded and in a fixed order,
//! so the generated files only differ between runs in their `DTSTAMP`.

use std::{
    fs::write,
    path::{Path, PathBuf},
};

use ical::{
    generator::{IcalCalendar, IcalEvent, Property},
    ical_param, ical_property,
};
use tracing::info;

use crate::{
    config::calendar_path,
    error::{Error, Result},
    pickup::Pickup,
    schedule::{CalendarGroup, Schedule},
};

static PROD_ID: &str = "https://github.com/mtpettyp/ical_toronto_waste";
static TIMEZONE: &str = "America/Toronto";
static FORMAT: &str = "%Y%m%d";
static STAMP_FORMAT: &str = "%Y%m%dT%H%M%S";
static EXTENSION: &str = "ics";
static LINE_ENDING: &str = "\r\n";

/// The generation time of a run in local time, e.g. `20240601T093000`.
pub fn generation_stamp() -> String {
    chrono::Local::now().format(STAMP_FORMAT).to_string()
}

/// Write one iCalendar file per calendar into `dir` and return the written paths.
///
/// All events of the run share the same `DTSTAMP`.
pub fn write_all(schedule: &Schedule, dir: &Path) -> Result<Vec<PathBuf>> {
    info!("Writing ICS calendars");
    let stamp = generation_stamp();
    let paths = write_all_stamped(schedule, dir, &stamp)?;
    info!("Finished writing ICS calendars");
    Ok(paths)
}

/// Same as [`write_all`] with a given generation stamp.
pub fn write_all_stamped(schedule: &Schedule, dir: &Path, stamp: &str) -> Result<Vec<PathBuf>> {
    let mut paths = vec![];
    for group in schedule {
        paths.push(write_calendar(group, dir, stamp)?);
    }
    Ok(paths)
}

/// Write the iCalendar file of a single calendar, an existing file is overwritten.
pub fn write_calendar(group: &CalendarGroup, dir: &Path, stamp: &str) -> Result<PathBuf> {
    info!("Writing {} ICS", group.calendar);
    let path = calendar_path(dir, &group.calendar, EXTENSION);
    write(&path, get_calendar(group, stamp).content_lines()).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Build the calendar of a group.
pub fn get_calendar(group: &CalendarGroup, stamp: &str) -> IcalCalendar {
    let mut calendar = IcalCalendar::new();
    calendar.properties = vec![
        ical_property!("VERSION", "2.0"),
        ical_property!("CALSCALE", "GREGORIAN"),
        ical_property!("METHOD", "PUBLISH"),
        ical_property!("PRODID", PROD_ID),
        ical_property!("X-WR-CALNAME", format!("{} Waste Pickup", group.calendar)),
        ical_property!("X-WR-TIMEZONE", TIMEZONE),
    ];
    for pickup in &group.pickups {
        calendar
            .events
            .push(get_event(&group.calendar, pickup, stamp));
    }
    calendar
}

fn get_event(calendar: &str, pickup: &Pickup, stamp: &str) -> IcalEvent {
    let start = pickup.day.format(FORMAT).to_string();
    let mut event = IcalEvent::new();
    event.properties = vec![
        ical_property!("URL", pickup.url(), ical_param!("VALUE", "URI")),
        ical_property!("SUMMARY", pickup.subject()),
        ical_property!("DTSTART", &start, ical_param!("VALUE", "DATE")),
        ical_property!("DTSTAMP", stamp, ical_param!("VALUE", "DATETIME")),
        ical_property!("UID", uid(&start, calendar)),
        ical_property!("DESCRIPTION", pickup.description()),
        ical_property!("TRANSP", "TRANSPARENT"),
    ];
    event
}

/// Get the id of a pickup from its formatted date and its calendar.
///
/// Two pickups of the same calendar on the same day share their id.
/// Changing this function is a breaking change!
fn uid(start: &str, calendar: &str) -> String {
    format!("{start}{calendar}")
}

/// Emit iCalendar content lines.
///
/// Lines are not folded, every line ends with CRLF.
pub trait ContentLines {
    fn write_content_lines(&self, output: &mut String);

    fn content_lines(&self) -> String {
        let mut output = String::new();
        self.write_content_lines(&mut output);
        output
    }
}

impl ContentLines for Property {
    fn write_content_lines(&self, output: &mut String) {
        output.push_str(&self.name);
        for (key, values) in self.params.iter().flatten() {
            output.push(';');
            output.push_str(key);
            output.push('=');
            output.push_str(&values.join(","));
        }
        output.push(':');
        if let Some(value) = &self.value {
            output.push_str(value);
        }
        output.push_str(LINE_ENDING);
    }
}

fn begin(output: &mut String, name: &str, properties: &[Property]) {
    output.push_str(&format!("BEGIN:{name}{LINE_ENDING}"));
    for property in properties {
        property.write_content_lines(output);
    }
}

fn end(output: &mut String, name: &str) {
    output.push_str(&format!("END:{name}{LINE_ENDING}"));
}

impl ContentLines for IcalEvent {
    fn write_content_lines(&self, output: &mut String) {
        begin(output, "VEVENT", &self.properties);
        end(output, "VEVENT");
    }
}

impl ContentLines for IcalCalendar {
    fn write_content_lines(&self, output: &mut String) {
        begin(output, "VCALENDAR", &self.properties);
        for event in &self.events {
            event.write_content_lines(output);
        }
        end(output, "VCALENDAR");
    }
}
