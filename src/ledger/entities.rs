use std::fmt::Display;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::utils::time::{date_to_record_name, record_name_to_date};

const MARKER_PREFIX: &str = "shame_";
const MARKER_SUFFIX: &str = ".txt";

/// One day without activity. Stored as `shame_<YYYY-MM-DD>.txt`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
pub struct MarkerFile {
    pub date: NaiveDate,
}

impl MarkerFile {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn file_name(&self) -> String {
        format!("{MARKER_PREFIX}{}{MARKER_SUFFIX}", date_to_record_name(self.date))
    }

    /// Sentence written into the marker.
    pub fn content(&self) -> String {
        format!("You failed your discipline on {}", date_to_record_name(self.date))
    }

    /// Whether `name` belongs to the ledger at all. Anything else in the directory is ignored.
    pub fn matches_pattern(name: &str) -> bool {
        name.starts_with(MARKER_PREFIX) && name.ends_with(MARKER_SUFFIX)
    }

    /// Parses a file name that [MarkerFile::matches_pattern]. A marker whose date can't be read
    /// means someone tampered with the ledger, which is an error rather than something to skip.
    pub fn from_file_name(name: &str) -> Result<Self> {
        name.strip_prefix(MARKER_PREFIX)
            .and_then(|v| v.strip_suffix(MARKER_SUFFIX))
            .and_then(record_name_to_date)
            .map(Self::new)
            .ok_or_else(|| {
                anyhow!("Corrupted ledger: marker {name:?} doesn't contain a valid date")
            })
    }
}

impl Display for MarkerFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// What happened when writing a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerWrite {
    Created,
    /// A marker for the date was already there and got rewritten with the same content.
    Replaced,
}
