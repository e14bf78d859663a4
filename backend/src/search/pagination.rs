//! Incremental reveal of filtered results.

use std::sync::Arc;

use crate::models::Lecture;

use super::filter::FilterResult;

/// Rows revealed per sentinel hit.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Growing prefix of a [`FilterResult`].
///
/// The window is bound to one result list. Syncing it with a different list
/// (by identity) starts over at page 1.
#[derive(Debug, Clone)]
pub struct PaginationWindow {
    source: FilterResult,
    page: usize,
    page_size: usize,
}

impl PaginationWindow {
    pub fn new(source: FilterResult, page_size: usize) -> Self {
        Self {
            source,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Rebind to `source`. Returns true if the page was reset.
    pub fn sync(&mut self, source: &FilterResult) -> bool {
        if self.source.same_as(source) {
            return false;
        }
        self.source = source.clone();
        self.page = 1;
        true
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn visible_len(&self) -> usize {
        self.page
            .saturating_mul(self.page_size)
            .min(self.source.total())
    }

    pub fn visible(&self) -> &[Arc<Lecture>] {
        &self.source.lectures()[..self.visible_len()]
    }

    pub fn has_more(&self) -> bool {
        self.visible_len() < self.source.total()
    }

    /// Sentinel entered view: reveal one more page. No-op once everything is visible.
    pub fn advance(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.page += 1;
        true
    }
}
