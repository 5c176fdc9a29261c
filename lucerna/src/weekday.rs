//! Canonical weekday labels and the per-weekday focus aggregation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::record::SessionRecord;

/// A day of the week, Monday-first.
///
/// A dedicated enum rather than [`chrono::Weekday`], so the snapshot label
/// text and the canonical chart order are pinned by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Position in the Monday-first week, `0..=6`.
    pub const fn index(self) -> usize {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }

    /// Three-letter label for narrow displays.
    pub const fn short(self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
            Self::Sunday => "Sun",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl From<NaiveDate> for Weekday {
    fn from(date: NaiveDate) -> Self {
        date.weekday().into()
    }
}

/// Focused minutes summed per weekday, for charting.
///
/// Always holds exactly 7 entries in canonical Monday-first order, with 0
/// for weekdays that have no matching records, so a chart axis stays stable
/// across different range selections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdayTotals {
    totals: [u64; 7],
}

impl WeekdayTotals {
    /// Sums the clamped focused minutes of `records` into weekday buckets.
    pub fn collect(records: &[SessionRecord]) -> Self {
        let mut totals = [0u64; 7];
        for record in records {
            totals[record.weekday.index()] += u64::from(record.clamped_focused());
        }
        Self { totals }
    }

    /// Focused minutes logged on the given weekday.
    pub const fn get(self, weekday: Weekday) -> u64 {
        self.totals[weekday.index()]
    }

    /// All 7 entries, Monday first.
    pub fn iter(self) -> impl Iterator<Item = (Weekday, u64)> {
        Weekday::iter().map(move |weekday| (weekday, self.totals[weekday.index()]))
    }

    /// Grand total across the week.
    pub fn total(self) -> u64 {
        self.totals.iter().sum()
    }
}
