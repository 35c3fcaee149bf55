//! Summary of the ledger. Derived on every run, never stored.

use std::fmt::Display;

use chrono::NaiveDate;

use crate::{ledger::entities::MarkerFile, utils::time::date_to_record_name};

/// Date of the most recent marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastShame {
    Never,
    On(NaiveDate),
}

impl Display for LastShame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LastShame::Never => write!(f, "Never"),
            LastShame::On(date) => write!(f, "{}", date_to_record_name(*date)),
        }
    }
}

/// Days since the most recent marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Streak {
    /// Whole days between the last marker and today. Negative if the ledger holds a marker from
    /// the future, which only happens when someone writes one by hand.
    Days(i64),
    /// There are no markers at all.
    PerfectDiscipline,
}

impl Display for Streak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Streak::Days(days) => write!(f, "{days} days"),
            Streak::PerfectDiscipline => write!(f, "🔥 Perfect Discipline!"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryStats {
    pub total: usize,
    pub last_shame: LastShame,
    pub streak: Streak,
}

impl SummaryStats {
    /// `markers` are expected in chronological order, as returned by the ledger.
    pub fn compute(markers: &[MarkerFile], today: NaiveDate) -> Self {
        match markers.last() {
            Some(last) => SummaryStats {
                total: markers.len(),
                last_shame: LastShame::On(last.date),
                streak: Streak::Days((today - last.date).num_days()),
            },
            None => SummaryStats {
                total: 0,
                last_shame: LastShame::Never,
                streak: Streak::PerfectDiscipline,
            },
        }
    }
}
