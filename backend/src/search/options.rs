//! Search facets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{parse_credits, Day, TableId};

/// Facets of one search. Empty sets and `None` match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOption {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub grades: BTreeSet<u8>,
    #[serde(default)]
    pub days: BTreeSet<Day>,
    #[serde(default)]
    pub times: BTreeSet<u8>,
    #[serde(default)]
    pub majors: BTreeSet<String>,
    #[serde(default)]
    pub credits: Option<u8>,
}

/// Where a search was opened from: a table, optionally a clicked cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchScope {
    pub table: TableId,
    pub day: Option<Day>,
    pub time: Option<u8>,
}

impl SearchScope {
    /// Search opened from a table's "add" button.
    pub fn table(table: TableId) -> Self {
        Self {
            table,
            day: None,
            time: None,
        }
    }

    /// Search opened by clicking an empty cell.
    pub fn cell(table: TableId, day: Day, time: u8) -> Self {
        Self {
            table,
            day: Some(day),
            time: Some(time),
        }
    }
}

/// One facet edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchChange {
    Query(Option<String>),
    Credits(Option<u8>),
    Grades(BTreeSet<u8>),
    Days(BTreeSet<Day>),
    Times(BTreeSet<u8>),
    Majors(BTreeSet<String>),
}

impl SearchChange {
    /// Credits picked from a select box, where `""` means "any".
    pub fn credits_from_str(raw: &str) -> Self {
        SearchChange::Credits(parse_credits(raw))
    }
}

impl SearchOption {
    /// Default facets for a scope: a clicked cell pre-selects its day and slot.
    pub fn for_scope(scope: &SearchScope) -> Self {
        Self {
            days: scope.day.into_iter().collect(),
            times: scope.time.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn apply(&mut self, change: SearchChange) {
        match change {
            SearchChange::Query(query) => self.query = query.filter(|q| !q.is_empty()),
            SearchChange::Credits(credits) => self.credits = credits,
            SearchChange::Grades(grades) => self.grades = grades,
            SearchChange::Days(days) => self.days = days,
            SearchChange::Times(times) => self.times = times,
            SearchChange::Majors(majors) => self.majors = majors,
        }
    }

    /// True when no facet constrains the result.
    pub fn is_unfiltered(&self) -> bool {
        self.query.as_deref().map_or(true, str::is_empty)
            && self.credits.is_none()
            && self.grades.is_empty()
            && self.days.is_empty()
            && self.times.is_empty()
            && self.majors.is_empty()
    }
}
