//! Search dialog flow.
//!
//! A session is opened from a table (optionally a clicked cell), loads the
//! merged catalog, recomputes the filtered list on every facet change, reveals
//! it page by page and adds the picked lecture to the table.

use std::sync::Arc;

use log::{debug, info};

use crate::catalog::{CatalogError, LectureCache};
use crate::models::Lecture;
use crate::parsing::entries_for_lecture;
use crate::search::{
    CatalogIndex, FilterResult, PaginationWindow, SearchChange, SearchOption, SearchScope,
};
use crate::store::ScheduleStore;

/// Load state of the catalog behind a session.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    Loading,
    Ready,
    Failed(CatalogError),
}

pub struct SearchSession {
    scope: SearchScope,
    option: SearchOption,
    state: CatalogState,
    index: Option<Arc<CatalogIndex>>,
    result: FilterResult,
    window: PaginationWindow,
}

impl SearchSession {
    /// Session for `scope` with no catalog yet.
    pub fn new(scope: SearchScope, page_size: usize) -> Self {
        let option = SearchOption::for_scope(&scope);
        let result = FilterResult::default();
        Self {
            scope,
            option,
            state: CatalogState::Loading,
            index: None,
            window: PaginationWindow::new(result.clone(), page_size),
            result,
        }
    }

    /// Session over an already indexed catalog.
    pub fn with_catalog(scope: SearchScope, index: Arc<CatalogIndex>, page_size: usize) -> Self {
        let mut session = Self::new(scope, page_size);
        session.set_catalog(index);
        session
    }

    /// Open a session and load the merged catalog through `cache`.
    pub async fn open(cache: &LectureCache, scope: SearchScope, page_size: usize) -> Self {
        let mut session = Self::new(scope, page_size);
        session.load(cache).await;
        session
    }

    /// (Re)load the catalog. A cached failure stays failed until the cache
    /// is invalidated.
    pub async fn load(&mut self, cache: &LectureCache) {
        self.state = CatalogState::Loading;
        match cache.get_all_lectures().await {
            Ok(lectures) => self.set_catalog(Arc::new(CatalogIndex::new(lectures))),
            Err(e) => {
                self.state = CatalogState::Failed(e);
                self.index = None;
                self.recompute();
            }
        }
    }

    fn set_catalog(&mut self, index: Arc<CatalogIndex>) {
        info!(
            "Search for table {} ready over {} lectures",
            self.scope.table,
            index.len()
        );
        self.index = Some(index);
        self.state = CatalogState::Ready;
        self.recompute();
    }

    /// Apply one facet edit and recompute. Always starts over at page 1.
    pub fn change(&mut self, change: SearchChange) {
        self.option.apply(change);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.result = match &self.index {
            Some(index) => index.filter(&self.option),
            None => FilterResult::default(),
        };
        self.window.sync(&self.result);
        debug!("Search matched {} lectures", self.result.total());
    }

    /// Sentinel entered view.
    pub fn on_sentinel_visible(&mut self) -> bool {
        self.window.advance()
    }

    pub fn scope(&self) -> &SearchScope {
        &self.scope
    }

    pub fn option(&self) -> &SearchOption {
        &self.option
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn visible(&self) -> &[Arc<Lecture>] {
        self.window.visible()
    }

    pub fn total(&self) -> usize {
        self.result.total()
    }

    pub fn page(&self) -> usize {
        self.window.page()
    }

    pub fn has_more(&self) -> bool {
        self.window.has_more()
    }

    /// Majors offered by the loaded catalog, in first-seen order.
    pub fn all_majors(&self) -> &[String] {
        match &self.index {
            Some(index) => index.majors(),
            None => &[],
        }
    }

    /// Add every parsed block of `lecture_id` to the session's table.
    ///
    /// Returns the number of entries added. Zero when the lecture is unknown,
    /// its schedule has no valid block, or the table no longer exists.
    pub fn select(&self, lecture_id: &str, store: &ScheduleStore) -> usize {
        let Some(lecture) = self.index.as_ref().and_then(|index| index.get(lecture_id)) else {
            debug!("Selected unknown lecture {}", lecture_id);
            return 0;
        };

        let entries = entries_for_lecture(lecture);
        let count = entries.len();
        if !store.add_entries(&self.scope.table, entries) {
            return 0;
        }
        info!(
            "Added {} ({} blocks) to table {}",
            lecture.id, count, self.scope.table
        );
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CacheKey, StaticSource};
    use crate::models::Day;
    use std::collections::BTreeSet;

    fn lecture(id: &str, grade: u8, schedule: &str) -> Lecture {
        Lecture {
            id: id.to_string(),
            title: format!("Lecture {}", id),
            credits: Some(3),
            grade,
            major: "공과대학<p>컴퓨터공학과".to_string(),
            schedule: schedule.to_string(),
        }
    }

    fn catalog() -> Arc<CatalogIndex> {
        let mut lectures: Vec<Lecture> = (0..150)
            .map(|i| lecture(&format!("L{:03}", i), (i % 4 + 1) as u8, "월1~2(A101)"))
            .collect();
        lectures.push(lecture("SPLIT", 2, "화1~2(B1)<p>목3(B2)"));
        Arc::new(CatalogIndex::new(lectures))
    }

    #[test]
    fn test_cell_scope_seeds_facets() {
        let store = ScheduleStore::seeded();
        let table = store.table_ids()[0].clone();
        let scope = SearchScope::cell(table, Day::Thu, 3);
        let session = SearchSession::with_catalog(scope, catalog(), 100);

        assert_eq!(session.option().days, BTreeSet::from([Day::Thu]));
        let ids: Vec<&str> = session.visible().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["SPLIT"]);
    }

    #[test]
    fn test_change_resets_pagination() {
        let table = ScheduleStore::seeded().table_ids()[0].clone();
        let mut session = SearchSession::with_catalog(SearchScope::table(table), catalog(), 100);

        assert_eq!(session.total(), 151);
        assert_eq!(session.visible().len(), 100);
        assert!(session.on_sentinel_visible());
        assert_eq!(session.visible().len(), 151);
        assert!(!session.on_sentinel_visible());

        session.change(SearchChange::Grades(BTreeSet::from([1])));
        assert_eq!(session.page(), 1);
        assert_eq!(session.total(), 38);
        assert!(!session.has_more());
    }

    #[test]
    fn test_select_adds_each_block() {
        let store = ScheduleStore::seeded();
        let table = store.table_ids()[0].clone();
        let session =
            SearchSession::with_catalog(SearchScope::table(table.clone()), catalog(), 100);

        assert_eq!(session.select("SPLIT", &store), 2);
        assert_eq!(session.select("NOPE", &store), 0);

        let entries = store.list_entries(&table);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].day, Day::Thu);
        assert_eq!(entries[1].room.as_deref(), Some("B2"));
    }

    #[tokio::test]
    async fn test_open_reports_failure() {
        let cache = LectureCache::new(Arc::new(
            StaticSource::new().with_document(CacheKey::Majors, vec![lecture("A", 1, "월1")]),
        ));
        let table = ScheduleStore::seeded().table_ids()[0].clone();
        let session = SearchSession::open(&cache, SearchScope::table(table), 100).await;

        assert!(matches!(session.state(), CatalogState::Failed(_)));
        assert!(session.visible().is_empty());
        assert!(session.all_majors().is_empty());
    }

    #[tokio::test]
    async fn test_open_loads_merged_catalog() {
        let cache = LectureCache::new(Arc::new(
            StaticSource::new()
                .with_document(CacheKey::Majors, vec![lecture("A", 1, "월1")])
                .with_document(CacheKey::LiberalArts, vec![lecture("B", 2, "화2")]),
        ));
        let table = ScheduleStore::seeded().table_ids()[0].clone();
        let session = SearchSession::open(&cache, SearchScope::table(table), 100).await;

        assert_eq!(session.state(), &CatalogState::Ready);
        assert_eq!(session.total(), 2);
        assert_eq!(session.all_majors(), ["공과대학<p>컴퓨터공학과".to_string()]);
    }
}
