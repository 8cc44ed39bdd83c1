//! Errors of reading schedules and writing calendars.

use std::path::PathBuf;

use thiserror::Error;

/// A single schedule row could not be turned into a pickup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("date {0:?} does not match any known format")]
    InvalidDateFormat(String),
    #[error("expected {expected} fields but found {found}")]
    MalformedRow { expected: usize, found: usize },
}

/// Any failure which aborts a run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{}:{line}: {source}", path.display())]
    Record {
        path: PathBuf,
        line: u64,
        #[source]
        source: RecordError,
    },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("invalid schedules pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("cannot read schedules: {0}")]
    Glob(#[from] glob::GlobError),
}

pub type Result<T> = std::result::Result<T, Error>;
