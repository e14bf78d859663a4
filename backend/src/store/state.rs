//! Immutable schedule map and its reducer.
//!
//! Every mutation is a pure `&ScheduleMap -> Option<ScheduleMap>` function.
//! `None` means the operation had no effect and the caller keeps the old map.
//! A new map shares every table and entry it did not touch, so consumers can
//! skip work with `Arc::ptr_eq`.

use std::sync::Arc;

use super::{StoreError, TableId};
use crate::models::{Day, ScheduleEntry, TimeRange};

pub type EntryRef = Arc<ScheduleEntry>;
pub type TableEntries = Arc<Vec<EntryRef>>;

/// One weekly schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub id: TableId,
    pub entries: TableEntries,
}

/// Tables in creation order. Never empty.
///
/// Equality is by value; use [`ScheduleMap::get`] with `Arc::ptr_eq` for
/// identity checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleMap {
    tables: Vec<Table>,
}

/// A mutation request, applied through [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddTable {
        id: TableId,
    },
    DuplicateTable {
        source: TableId,
        id: TableId,
    },
    RemoveTable {
        id: TableId,
    },
    Relocate {
        table: TableId,
        index: usize,
        day: Day,
        range: TimeRange,
    },
    AddEntries {
        table: TableId,
        entries: Vec<ScheduleEntry>,
    },
    DeleteEntry {
        table: TableId,
        day: Day,
        time: u8,
    },
}

/// Apply an action, returning `None` when the state is unchanged.
pub fn reduce(state: &ScheduleMap, action: &Action) -> Option<ScheduleMap> {
    match action {
        Action::AddTable { id } => state.add_table(id.clone()),
        Action::DuplicateTable { source, id } => state.duplicate_table(source, id.clone()),
        Action::RemoveTable { id } => state.remove_table(id),
        Action::Relocate {
            table,
            index,
            day,
            range,
        } => state.relocate(table, *index, *day, range.clone()),
        Action::AddEntries { table, entries } => state.add_entries(table, entries.clone()),
        Action::DeleteEntry { table, day, time } => state.delete_entry(table, *day, *time),
    }
}

impl ScheduleMap {
    /// A map holding a single empty table.
    pub fn with_table(id: TableId) -> Self {
        Self {
            tables: vec![Table {
                id,
                entries: Arc::new(Vec::new()),
            }],
        }
    }

    /// Build a map from seed tables, in the given order.
    pub fn from_tables<I>(tables: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (TableId, Vec<ScheduleEntry>)>,
    {
        let mut seeded: Vec<Table> = Vec::new();
        for (id, entries) in tables {
            if seeded.iter().any(|t| t.id == id) {
                return Err(StoreError::DuplicateTable(id));
            }
            seeded.push(Table {
                id,
                entries: Arc::new(entries.into_iter().map(Arc::new).collect()),
            });
        }
        if seeded.is_empty() {
            return Err(StoreError::NoTables);
        }
        Ok(Self { tables: seeded })
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Always false: a map keeps at least one table.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table_ids(&self) -> Vec<TableId> {
        self.tables.iter().map(|t| t.id.clone()).collect()
    }

    pub fn contains(&self, id: &TableId) -> bool {
        self.position(id).is_some()
    }

    /// The entry list bound to a table.
    pub fn get(&self, id: &TableId) -> Option<&TableEntries> {
        self.tables.iter().find(|t| &t.id == id).map(|t| &t.entries)
    }

    /// Entries of a table, empty for unknown ids.
    pub fn entries(&self, id: &TableId) -> &[EntryRef] {
        self.get(id).map(|entries| entries.as_slice()).unwrap_or(&[])
    }

    pub fn add_table(&self, id: TableId) -> Option<Self> {
        if self.contains(&id) {
            return None;
        }
        let mut tables = self.tables.clone();
        tables.push(Table {
            id,
            entries: Arc::new(Vec::new()),
        });
        Some(Self { tables })
    }

    /// Append a table holding a shallow copy of `source`'s list: a new list
    /// sharing the same entry references.
    pub fn duplicate_table(&self, source: &TableId, id: TableId) -> Option<Self> {
        if self.contains(&id) {
            return None;
        }
        let copied = Arc::new(self.get(source)?.as_ref().clone());
        let mut tables = self.tables.clone();
        tables.push(Table {
            id,
            entries: copied,
        });
        Some(Self { tables })
    }

    /// Remove a table. Refused for the last remaining table.
    pub fn remove_table(&self, id: &TableId) -> Option<Self> {
        if self.tables.len() <= 1 {
            return None;
        }
        let position = self.position(id)?;
        let mut tables = self.tables.clone();
        tables.remove(position);
        Some(Self { tables })
    }

    /// Move one entry. Only that entry and its table's list get new references.
    pub fn relocate(
        &self,
        table: &TableId,
        index: usize,
        day: Day,
        range: TimeRange,
    ) -> Option<Self> {
        let position = self.position(table)?;
        let current = self.tables[position].entries.get(index)?;
        if current.day == day && current.range == range {
            return None;
        }
        let moved = Arc::new(current.moved_to(day, range));

        let entries: Vec<EntryRef> = self.tables[position]
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                if i == index {
                    Arc::clone(&moved)
                } else {
                    Arc::clone(entry)
                }
            })
            .collect();
        Some(self.with_entries(position, entries))
    }

    pub fn add_entries(&self, table: &TableId, entries: Vec<ScheduleEntry>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let position = self.position(table)?;
        let mut updated = self.tables[position].entries.as_ref().clone();
        updated.extend(entries.into_iter().map(Arc::new));
        Some(self.with_entries(position, updated))
    }

    /// Remove every entry on `day` whose range contains `time`.
    pub fn delete_entry(&self, table: &TableId, day: Day, time: u8) -> Option<Self> {
        let position = self.position(table)?;
        let current = &self.tables[position].entries;
        let kept: Vec<EntryRef> = current
            .iter()
            .filter(|entry| !entry.occupies(day, time))
            .cloned()
            .collect();
        if kept.len() == current.len() {
            return None;
        }
        Some(self.with_entries(position, kept))
    }

    fn position(&self, id: &TableId) -> Option<usize> {
        self.tables.iter().position(|t| &t.id == id)
    }

    fn with_entries(&self, position: usize, entries: Vec<EntryRef>) -> Self {
        let mut tables = self.tables.clone();
        tables[position].entries = Arc::new(entries);
        Self { tables }
    }
}
