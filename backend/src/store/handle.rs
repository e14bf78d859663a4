//! Shared store handle with per-table subscriptions.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};
use parking_lot::Mutex;
use tokio::sync::watch;

use super::state::{reduce, Action, ScheduleMap, TableEntries};
use super::TableId;
use crate::models::{Day, ScheduleEntry, TimeRange};

/// Cloneable handle to the schedule state.
///
/// All writes go through [`ScheduleStore::update`], which holds the state lock
/// for the whole `old -> new` transition and then notifies subscribers of the
/// tables whose list reference changed.
#[derive(Clone)]
pub struct ScheduleStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: Mutex<Arc<ScheduleMap>>,
    table_watchers: Mutex<HashMap<TableId, watch::Sender<Option<TableEntries>>>>,
    ids_watcher: watch::Sender<Vec<TableId>>,
}

impl ScheduleStore {
    /// Create a store over an initial map.
    pub fn new(initial: ScheduleMap) -> Self {
        let (ids_watcher, _) = watch::channel(initial.table_ids());
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(Arc::new(initial)),
                table_watchers: Mutex::new(HashMap::new()),
                ids_watcher,
            }),
        }
    }

    /// Create a store seeded with one empty table.
    pub fn seeded() -> Self {
        let id = next_table_id(None);
        info!("Seeding schedule store with table {}", id);
        Self::new(ScheduleMap::with_table(id))
    }

    /// Current state. Cheap: clones an `Arc`.
    pub fn snapshot(&self) -> Arc<ScheduleMap> {
        Arc::clone(&self.inner.state.lock())
    }

    /// Entries of a table, or an empty list for unknown ids.
    pub fn list_entries(&self, table: &TableId) -> TableEntries {
        self.snapshot()
            .get(table)
            .cloned()
            .unwrap_or_else(|| Arc::new(Vec::new()))
    }

    pub fn table_ids(&self) -> Vec<TableId> {
        self.snapshot().table_ids()
    }

    pub fn table_count(&self) -> usize {
        self.snapshot().len()
    }

    /// Apply an action. Returns whether the state changed.
    pub fn dispatch(&self, action: Action) -> bool {
        let changed = self.update(|state| reduce(state, &action));
        if !changed {
            debug!("Action had no effect: {:?}", action);
        }
        changed
    }

    /// Run a reducer-like function against the current state.
    ///
    /// This is the only write path. `f` returns `None` to leave the state (and
    /// its reference) untouched.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&ScheduleMap) -> Option<ScheduleMap>,
    {
        let mut state = self.inner.state.lock();
        let Some(next) = f(state.as_ref()) else {
            return false;
        };
        let previous = std::mem::replace(&mut *state, Arc::new(next));
        self.publish(&previous, &state);
        true
    }

    /// Add an empty table and return its id. `None` if the insert was refused.
    pub fn add_table(&self) -> Option<TableId> {
        let mut created = None;
        self.update(|state| {
            let id = next_table_id(Some(state));
            let next = state.add_table(id.clone())?;
            created = Some(id);
            Some(next)
        });
        match &created {
            Some(id) => info!("Added table {}", id),
            None => debug!("Table insert had no effect"),
        }
        created
    }

    /// Copy a table's list into a new table. `None` if `source` is unknown.
    pub fn duplicate_table(&self, source: &TableId) -> Option<TableId> {
        let mut created = None;
        self.update(|state| {
            let id = next_table_id(Some(state));
            let next = state.duplicate_table(source, id.clone())?;
            created = Some(id);
            Some(next)
        });
        match &created {
            Some(id) => info!("Duplicated table {} into {}", source, id),
            None => debug!("Ignored duplicate of unknown table {}", source),
        }
        created
    }

    /// Remove a table. Refused for unknown ids and for the last table.
    pub fn remove_table(&self, table: &TableId) -> bool {
        let removed = self.dispatch(Action::RemoveTable { id: table.clone() });
        if removed {
            info!("Removed table {}", table);
        }
        removed
    }

    pub fn relocate(&self, table: &TableId, index: usize, day: Day, range: TimeRange) -> bool {
        self.dispatch(Action::Relocate {
            table: table.clone(),
            index,
            day,
            range,
        })
    }

    pub fn add_entries(&self, table: &TableId, entries: Vec<ScheduleEntry>) -> bool {
        self.dispatch(Action::AddEntries {
            table: table.clone(),
            entries,
        })
    }

    /// Remove every entry on `day` whose range contains `time`.
    pub fn delete_entry(&self, table: &TableId, day: Day, time: u8) -> bool {
        self.dispatch(Action::DeleteEntry {
            table: table.clone(),
            day,
            time,
        })
    }

    /// Watch one table's entry list.
    ///
    /// The receiver sees a new value only when that table's list reference
    /// changes; `None` means the table does not exist (or was removed).
    pub fn subscribe(&self, table: &TableId) -> watch::Receiver<Option<TableEntries>> {
        let state = self.inner.state.lock();
        let mut watchers = self.inner.table_watchers.lock();
        watchers
            .entry(table.clone())
            .or_insert_with(|| watch::channel(state.get(table).cloned()).0)
            .subscribe()
    }

    /// Watch the ordered list of table ids.
    pub fn subscribe_table_ids(&self) -> watch::Receiver<Vec<TableId>> {
        self.inner.ids_watcher.subscribe()
    }

    fn publish(&self, previous: &ScheduleMap, current: &ScheduleMap) {
        let mut watchers = self.inner.table_watchers.lock();
        watchers.retain(|_, tx| tx.receiver_count() > 0);
        for (id, tx) in watchers.iter() {
            let changed = match (previous.get(id), current.get(id)) {
                (Some(before), Some(after)) => !Arc::ptr_eq(before, after),
                (None, None) => false,
                _ => true,
            };
            if changed {
                tx.send_replace(current.get(id).cloned());
            }
        }

        let ids = current.table_ids();
        if previous.table_ids() != ids {
            self.inner.ids_watcher.send_replace(ids);
        }
    }
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::seeded()
    }
}

/// `schedule-<unix millis>`, suffixed when that id is already taken.
fn next_table_id(state: Option<&ScheduleMap>) -> TableId {
    let base = format!("schedule-{}", chrono::Utc::now().timestamp_millis());
    let taken = |candidate: &TableId| state.is_some_and(|s| s.contains(candidate));

    let mut candidate = TableId::new(base.clone());
    let mut suffix = 1;
    while taken(&candidate) {
        candidate = TableId::new(format!("{}-{}", base, suffix));
        suffix += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Lecture;

    fn entry(id: &str, day: Day, start: u8, end: u8) -> ScheduleEntry {
        ScheduleEntry {
            day,
            range: TimeRange::new(start, end).unwrap(),
            room: None,
            lecture: Lecture {
                id: id.to_string(),
                title: format!("Lecture {}", id),
                credits: Some(3),
                grade: 1,
                major: "CS".to_string(),
                schedule: String::new(),
            },
        }
    }

    #[test]
    fn test_add_tables_get_unique_ids() {
        let store = ScheduleStore::seeded();
        let a = store.add_table().unwrap();
        let b = store.add_table().unwrap();

        assert_ne!(a, b);
        assert_eq!(store.table_count(), 3);
        assert!(store.table_ids().contains(&a));
        assert!(store.table_ids().contains(&b));
        assert!(store.list_entries(&b).is_empty());
    }

    #[test]
    fn test_last_table_cannot_be_removed() {
        let store = ScheduleStore::seeded();
        let only = store.table_ids()[0].clone();

        assert!(!store.remove_table(&only));
        assert_eq!(store.table_count(), 1);
    }

    #[test]
    fn test_unknown_table_is_noop() {
        let store = ScheduleStore::seeded();
        let before = store.snapshot();
        let ghost = TableId::from("ghost");

        assert!(!store.add_entries(&ghost, vec![entry("A", Day::Mon, 1, 2)]));
        assert!(!store.delete_entry(&ghost, Day::Mon, 1));
        assert!(!store.relocate(&ghost, 0, Day::Tue, TimeRange::single(1).unwrap()));
        assert!(store.duplicate_table(&ghost).is_none());
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert!(store.list_entries(&ghost).is_empty());
    }

    #[test]
    fn test_subscriber_notified_only_for_its_table() {
        let store = ScheduleStore::seeded();
        let first = store.table_ids()[0].clone();
        let second = store.add_table().unwrap();

        let mut first_rx = store.subscribe(&first);
        let mut second_rx = store.subscribe(&second);

        store.add_entries(&first, vec![entry("A", Day::Mon, 1, 2)]);

        assert!(first_rx.has_changed().unwrap());
        assert!(!second_rx.has_changed().unwrap());
        let seen = first_rx.borrow_and_update().clone().unwrap();
        assert_eq!(seen.len(), 1);

        assert!(store.remove_table(&second));
        assert!(second_rx.has_changed().unwrap());
        assert!(second_rx.borrow_and_update().is_none());
    }

    #[test]
    fn test_table_id_subscription_tracks_lifecycle() {
        let store = ScheduleStore::seeded();
        let mut ids_rx = store.subscribe_table_ids();
        let first = store.table_ids()[0].clone();

        store.add_entries(&first, vec![entry("A", Day::Mon, 1, 1)]);
        assert!(!ids_rx.has_changed().unwrap());

        let copy = store.duplicate_table(&first).unwrap();
        assert!(ids_rx.has_changed().unwrap());
        assert_eq!(*ids_rx.borrow_and_update(), vec![first.clone(), copy.clone()]);
        assert_eq!(store.list_entries(&copy).len(), 1);
    }
}
