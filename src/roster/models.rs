use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// One row of the extracted squad-list table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    /// Which squad the row came from (the source page of the squad list)
    pub source_group_id: String,
    /// Shirt / roster number, 1-based. `None` when missing or non-numeric
    pub roster_number: Option<u32>,
    /// Display name only
    pub name: String,
    /// `None` when the source text could not be parsed as a date
    pub date_of_birth: Option<NaiveDate>,
}

impl PlayerRecord {
    /// Month-day projection of the date of birth, if there is one.
    pub fn birthday_key(&self) -> Option<BirthdayKey> {
        self.date_of_birth.map(BirthdayKey::from_date)
    }
}

/// Calendar date with the year dropped.
///
/// Two players share a birthday iff their keys are equal. Feb 29 is kept as
/// an ordinary key; the probability model stays on 365 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BirthdayKey {
    pub month: u32,
    pub day: u32,
}

impl BirthdayKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for BirthdayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl Serialize for BirthdayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A ranked, fixed-size group of roster entries that passed eligibility.
/// Only built by `SquadGrouper`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Squad {
    source_group_id: String,
    members: Vec<PlayerRecord>,
}

impl Squad {
    pub(crate) fn new(source_group_id: String, members: Vec<PlayerRecord>) -> Self {
        Self {
            source_group_id,
            members,
        }
    }

    pub fn source_group_id(&self) -> &str {
        &self.source_group_id
    }

    /// Members in ascending roster-number order
    pub fn members(&self) -> &[PlayerRecord] {
        &self.members
    }
}
