//! Faceted lecture filtering.
//!
//! Schedule strings are parsed once when a [`CatalogIndex`] is built; each
//! call to [`CatalogIndex::filter`] is then a linear scan with cheap predicates.

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{Lecture, ScheduleBlock};
use crate::parsing::parse_schedule;

use super::options::SearchOption;

/// A lecture with its search keys precomputed.
#[derive(Debug, Clone)]
struct IndexedLecture {
    lecture: Arc<Lecture>,
    id_lower: String,
    title_lower: String,
    blocks: Vec<ScheduleBlock>,
}

impl IndexedLecture {
    fn new(lecture: Lecture) -> Self {
        Self {
            id_lower: lecture.id.to_lowercase(),
            title_lower: lecture.title.to_lowercase(),
            blocks: parse_schedule(&lecture.schedule),
            lecture: Arc::new(lecture),
        }
    }

    fn matches(&self, option: &SearchOption, query_lower: Option<&str>) -> bool {
        let lecture = &self.lecture;

        if let Some(query) = query_lower {
            if !(self.id_lower.contains(query) || self.title_lower.contains(query)) {
                return false;
            }
        }
        if let Some(credits) = option.credits {
            if lecture.credits != Some(credits) {
                return false;
            }
        }
        if !option.grades.is_empty() && !option.grades.contains(&lecture.grade) {
            return false;
        }
        if !option.majors.is_empty() && !option.majors.contains(&lecture.major) {
            return false;
        }
        if !option.days.is_empty() && !self.blocks.iter().any(|b| option.days.contains(&b.day)) {
            return false;
        }
        if !option.times.is_empty()
            && !self
                .blocks
                .iter()
                .any(|b| b.range.slots().any(|slot| option.times.contains(&slot)))
        {
            return false;
        }
        true
    }
}

/// The lecture universe, ready for repeated filtering.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    lectures: Vec<IndexedLecture>,
    majors: Vec<String>,
}

impl CatalogIndex {
    pub fn new(lectures: Vec<Lecture>) -> Self {
        let majors = all_majors(&lectures);
        Self {
            lectures: lectures.into_iter().map(IndexedLecture::new).collect(),
            majors,
        }
    }

    pub fn len(&self) -> usize {
        self.lectures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lectures.is_empty()
    }

    /// Distinct majors in first-seen order.
    pub fn majors(&self) -> &[String] {
        &self.majors
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Lecture>> {
        self.lectures
            .iter()
            .find(|indexed| indexed.lecture.id == id)
            .map(|indexed| &indexed.lecture)
    }

    /// Lectures matching every facet, in catalog order.
    ///
    /// Always returns a fresh result; paging resets on the new identity.
    pub fn filter(&self, option: &SearchOption) -> FilterResult {
        let query_lower = option
            .query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let lectures = self
            .lectures
            .iter()
            .filter(|indexed| indexed.matches(option, query_lower.as_deref()))
            .map(|indexed| Arc::clone(&indexed.lecture))
            .collect();
        FilterResult {
            lectures: Arc::new(lectures),
        }
    }
}

/// Filtered lectures. Cloning shares the list; identity is the list pointer.
#[derive(Debug, Clone, Default)]
pub struct FilterResult {
    lectures: Arc<Vec<Arc<Lecture>>>,
}

impl FilterResult {
    pub fn lectures(&self) -> &[Arc<Lecture>] {
        &self.lectures
    }

    pub fn total(&self) -> usize {
        self.lectures.len()
    }

    /// True when both results are the same list, not merely equal ones.
    pub fn same_as(&self, other: &FilterResult) -> bool {
        Arc::ptr_eq(&self.lectures, &other.lectures)
    }
}

/// Distinct `major` values in first-seen order.
pub fn all_majors(lectures: &[Lecture]) -> Vec<String> {
    let mut seen = HashSet::new();
    lectures
        .iter()
        .filter(|lecture| seen.insert(lecture.major.as_str()))
        .map(|lecture| lecture.major.clone())
        .collect()
}
