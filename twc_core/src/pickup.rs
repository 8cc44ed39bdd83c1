//! A pickup is a single waste collection date of a calendar.

use bitmask_enum::bitmask;
use chrono::NaiveDate;

use crate::error::RecordError;

/// Accepted formats of the date column with the position of their year, tried in order.
static INPUT_DATE_FORMATS: [(&str, usize); 2] = [("%d-%m-%Y", 2), ("%Y-%m-%d", 0)];
static DATE_SEPARATOR: char = '-';
/// `[index, calendar, day, green bin, garbage, recycling, yard waste, christmas tree]`
pub const FIELD_COUNT: usize = 8;
/// Every flag except this one marks a collected waste stream.
static NOT_COLLECTED: &str = "0";

static SUBJECT_GARBAGE: &str = "Garbage Day";
static EMOJI_GARBAGE: &str = "🗑";
static SUBJECT_RECYCLING: &str = "Recycling Day";
static EMOJI_RECYCLING: &str = "♻️";
static SUBJECT_YARD_WASTE: &str = "Yard Waste";
static EMOJI_YARD_WASTE: &str = "🍂";
static SUBJECT_CHRISTMAS_TREE: &str = "Christmas Tree";
static EMOJI_CHRISTMAS_TREE: &str = "🎄";

static LABEL_CHRISTMAS_TREE: &str = "Christmas Tree";
static LABEL_GARBAGE: &str = "Garbage";
static LABEL_RECYCLING: &str = "Recycling";
static LABEL_GREEN_BIN: &str = "Green Bin";
static LABEL_YARD_WASTE: &str = "Yard Waste";

pub static URL_GARBAGE: &str = "https://www.toronto.ca/services-payments/recycling-organics-garbage/houses/what-goes-in-my-green-bin/";
pub static URL_RECYCLING: &str =
    "https://www.toronto.ca/services-payments/recycling-organics-garbage/waste-wizard/";

#[bitmask(u8)]
pub enum WasteStream {
    GreenBin,
    Garbage,
    Recycling,
    YardWaste,
    ChristmasTree,
}

/// The waste streams collected for a calendar on a specific day.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub calendar: String,
    pub day: NaiveDate,
    pub streams: WasteStream,
}

impl Pickup {
    pub fn new(calendar: impl Into<String>, day: NaiveDate, streams: WasteStream) -> Self {
        Self {
            calendar: calendar.into(),
            day,
            streams,
        }
    }

    /// Build a pickup from the fields of one schedule row.
    ///
    /// The first field is the row index of the export and is ignored.
    pub fn from_row(row: &[&str]) -> Result<Self, RecordError> {
        let [_, calendar, day, green_bin, garbage, recycling, yard_waste, christmas_tree] = row
        else {
            return Err(RecordError::MalformedRow {
                expected: FIELD_COUNT,
                found: row.len(),
            });
        };
        let mut streams = WasteStream::none();
        for (field, stream) in [
            (green_bin, WasteStream::GreenBin),
            (garbage, WasteStream::Garbage),
            (recycling, WasteStream::Recycling),
            (yard_waste, WasteStream::YardWaste),
            (christmas_tree, WasteStream::ChristmasTree),
        ] {
            if *field != NOT_COLLECTED {
                streams |= stream;
            }
        }
        Ok(Self::new(*calendar, parse_date(day)?, streams))
    }

    pub fn green_bin(&self) -> bool {
        self.streams.contains(WasteStream::GreenBin)
    }

    pub fn garbage(&self) -> bool {
        self.streams.contains(WasteStream::Garbage)
    }

    pub fn recycling(&self) -> bool {
        self.streams.contains(WasteStream::Recycling)
    }

    pub fn yard_waste(&self) -> bool {
        self.streams.contains(WasteStream::YardWaste)
    }

    pub fn christmas_tree(&self) -> bool {
        self.streams.contains(WasteStream::ChristmasTree)
    }

    /// The event title, e.g. `♻️🗑 Recycling Day/Garbage Day`.
    ///
    /// Green bin collection is part of every regular pickup and has no title of its own.
    pub fn subject(&self) -> String {
        let mut emoji = String::new();
        let mut subjects: Vec<&str> = vec![];
        for (stream, stream_emoji, subject) in [
            (
                WasteStream::ChristmasTree,
                EMOJI_CHRISTMAS_TREE,
                SUBJECT_CHRISTMAS_TREE,
            ),
            (WasteStream::YardWaste, EMOJI_YARD_WASTE, SUBJECT_YARD_WASTE),
            (WasteStream::Recycling, EMOJI_RECYCLING, SUBJECT_RECYCLING),
            (WasteStream::Garbage, EMOJI_GARBAGE, SUBJECT_GARBAGE),
        ] {
            if self.streams.contains(stream) {
                emoji.push_str(stream_emoji);
                subjects.push(subject);
            }
        }
        format!("{emoji} {}", subjects.join("/"))
    }

    /// All collected streams, e.g. `Garbage/Recycling/Green Bin`.
    pub fn description(&self) -> String {
        [
            (WasteStream::ChristmasTree, LABEL_CHRISTMAS_TREE),
            (WasteStream::Garbage, LABEL_GARBAGE),
            (WasteStream::Recycling, LABEL_RECYCLING),
            (WasteStream::GreenBin, LABEL_GREEN_BIN),
            (WasteStream::YardWaste, LABEL_YARD_WASTE),
        ]
        .into_iter()
        .filter(|(stream, _)| self.streams.contains(*stream))
        .map(|(_, label)| label)
        .collect::<Vec<&str>>()
        .join("/")
    }

    pub fn url(&self) -> &'static str {
        if self.recycling() {
            URL_RECYCLING
        } else {
            URL_GARBAGE
        }
    }
}

/// Parse a schedule date with the first matching input format.
///
/// The year must have exactly four digits, day and month one or two.
pub fn parse_date(date: &str) -> Result<NaiveDate, RecordError> {
    INPUT_DATE_FORMATS
        .iter()
        .filter(|(_, year_position)| has_date_shape(date, *year_position))
        .find_map(|(format, _)| NaiveDate::parse_from_str(date, format).ok())
        .ok_or_else(|| RecordError::InvalidDateFormat(String::from(date)))
}

/// Check for three dash separated groups of ASCII digits.
fn has_date_shape(date: &str, year_position: usize) -> bool {
    let parts: Vec<&str> = date.split(DATE_SEPARATOR).collect();
    parts.len() == 3
        && parts.iter().enumerate().all(|(position, part)| {
            let digits = if position == year_position { 4..=4 } else { 1..=2 };
            digits.contains(&part.len()) && part.bytes().all(|byte| byte.is_ascii_digit())
        })
}
