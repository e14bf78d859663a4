//! End-to-end flow: load catalog, search, add to a table, drag, delete.

mod support;

use std::collections::BTreeSet;
use std::sync::Arc;

use tempfile::TempDir;
use timetable_planner::catalog::{FileSource, LectureCache};
use timetable_planner::models::{Day, TimeRange};
use timetable_planner::placement::{DragEnd, GridGeometry, PixelDelta};
use timetable_planner::search::{SearchChange, SearchScope};
use timetable_planner::services::{
    CatalogState, DragController, DragOutcome, LecturePalette, SearchSession,
};
use timetable_planner::store::ScheduleStore;

async fn open_session(dir: &TempDir, scope: SearchScope) -> SearchSession {
    let cache = LectureCache::new(Arc::new(FileSource::new(dir.path())));
    SearchSession::open(&cache, scope, 2).await
}

#[tokio::test]
async fn test_search_add_drag_delete() {
    let dir = TempDir::new().unwrap();
    support::write_catalog(dir.path());
    let store = ScheduleStore::seeded();
    let table = store.table_ids()[0].clone();

    let mut session = open_session(&dir, SearchScope::table(table.clone())).await;
    assert_eq!(session.state(), &CatalogState::Ready);
    assert_eq!(session.visible().len(), 2);
    assert!(session.on_sentinel_visible());
    assert_eq!(session.visible().len(), 4);

    session.change(SearchChange::Query(Some("data".to_string())));
    assert_eq!(session.page(), 1);
    assert_eq!(session.total(), 1);
    assert_eq!(session.select("CS201", &store), 2);

    let drag = DragController::new(store.clone(), GridGeometry::default());
    let outcome = drag.handle_drag_end(&DragEnd {
        source_key: format!("{}:1", table),
        delta: PixelDelta::new(80.0, -45.0),
    });
    assert!(matches!(outcome, DragOutcome::Moved { day: Day::Fri, .. }));

    let entries = store.list_entries(&table);
    assert_eq!(entries[1].range, TimeRange::new(2, 3).unwrap());
    assert_eq!(entries[0].day, Day::Tue);

    let palette = LecturePalette::for_entries(entries.iter());
    assert_eq!(palette.len(), 1);

    assert!(store.delete_entry(&table, Day::Fri, 2));
    assert_eq!(store.list_entries(&table).len(), 1);
}

#[tokio::test]
async fn test_cell_scope_filters_by_day_and_slot() {
    let dir = TempDir::new().unwrap();
    support::write_catalog(dir.path());
    let table = ScheduleStore::seeded().table_ids()[0].clone();

    let mut session = open_session(&dir, SearchScope::cell(table, Day::Fri, 5)).await;
    let ids: Vec<&str> = session.visible().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["MA101"]);

    session.change(SearchChange::Times(BTreeSet::new()));
    session.change(SearchChange::Majors(BTreeSet::from(["교양".to_string()])));
    assert_eq!(session.total(), 1);
    assert_eq!(
        session.all_majors(),
        [
            "공과대학<p>컴퓨터공학과".to_string(),
            "교양".to_string()
        ]
    );
}

#[tokio::test]
async fn test_missing_catalog_surfaces_failed_state() {
    let dir = TempDir::new().unwrap();
    let table = ScheduleStore::seeded().table_ids()[0].clone();

    let session = open_session(&dir, SearchScope::table(table)).await;
    assert!(matches!(session.state(), CatalogState::Failed(_)));
    assert_eq!(session.total(), 0);
}
