//! Timetable Planner command-line entry point.
//!
//! Loads the lecture catalog, runs one search and adds the first match to a
//! fresh table, then prints the table.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin planner -- "data structures"
//! PLANNER_DATA_DIR=/srv/catalog cargo run --bin planner -- CS101
//! ```
//!
//! # Environment Variables
//!
//! - `PLANNER_DATA_DIR`: directory holding the catalog documents
//! - `PLANNER_PAGE_SIZE`: search results revealed per page
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use timetable_planner::catalog::{FileSource, LectureCache};
use timetable_planner::models::time_slot_label;
use timetable_planner::search::{SearchChange, SearchScope};
use timetable_planner::services::{CatalogState, LecturePalette, SearchSession};
use timetable_planner::{PlannerConfig, ScheduleStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let config = PlannerConfig::load()?;
    info!("Reading catalog from {}", config.catalog.data_dir.display());

    let cache = LectureCache::new(Arc::new(FileSource::from_settings(&config.catalog)));
    let store = ScheduleStore::seeded();
    let table = store
        .table_ids()
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("store has no table"))?;

    let scope = SearchScope::table(table.clone());
    let mut session = SearchSession::open(&cache, scope, config.search.page_size).await;
    if let CatalogState::Failed(e) = session.state() {
        anyhow::bail!("catalog unavailable: {}", e);
    }

    let query = env::args().skip(1).collect::<Vec<_>>().join(" ");
    session.change(SearchChange::Query(Some(query.clone())));
    info!("'{}' matched {} lectures", query, session.total());

    let Some(first) = session.visible().first().cloned() else {
        warn!("Nothing to add");
        return Ok(());
    };
    let added = session.select(&first.id, &store);
    info!("Added {} block(s) of {} {}", added, first.id, first.title);

    let entries = store.list_entries(&table);
    let palette = LecturePalette::for_entries(entries.iter());
    for entry in entries.iter() {
        println!(
            "{} {} x{} {:<24} {} {}",
            entry.day,
            time_slot_label(entry.range.start()).unwrap_or("?"),
            entry.range.len(),
            entry.lecture.title,
            entry.room.as_deref().unwrap_or("-"),
            palette.color_for(&entry.lecture.id)
        );
    }

    Ok(())
}
