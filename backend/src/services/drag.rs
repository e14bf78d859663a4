//! Drag-end handling: snap the pixel delta and commit the move to the store.

use log::debug;

use crate::models::{Day, TimeRange};
use crate::placement::{
    plan_relocation, DragEnd, GridGeometry, Placement, PlacementRejection, SourceKey,
};
use crate::store::ScheduleStore;

/// What a drag end did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Entry moved to a new cell.
    Moved {
        key: SourceKey,
        day: Day,
        range: TimeRange,
    },
    /// Snapped delta was zero.
    Unchanged,
    /// Move would leave the grid.
    Rejected(PlacementRejection),
    /// Source key was malformed or no longer refers to an entry.
    Ignored,
}

/// Commits drag ends against one store.
#[derive(Clone)]
pub struct DragController {
    store: ScheduleStore,
    grid: GridGeometry,
}

impl DragController {
    pub fn new(store: ScheduleStore, grid: GridGeometry) -> Self {
        Self { store, grid }
    }

    pub fn grid(&self) -> &GridGeometry {
        &self.grid
    }

    /// Plan and commit a drag end.
    ///
    /// The entry lookup and the write happen in one store update, so a
    /// concurrent edit cannot slip in between reading the source position and
    /// relocating it.
    pub fn handle_drag_end(&self, event: &DragEnd) -> DragOutcome {
        let key: SourceKey = match event.source_key.parse() {
            Ok(key) => key,
            Err(e) => {
                debug!("Ignoring drag end: {}", e);
                return DragOutcome::Ignored;
            }
        };

        let mut outcome = DragOutcome::Ignored;
        self.store.update(|state| {
            let entry = state.entries(&key.table).get(key.index)?;
            match plan_relocation(entry, event.delta, &self.grid) {
                Placement::Unchanged => {
                    outcome = DragOutcome::Unchanged;
                    None
                }
                Placement::Rejected(reason) => {
                    outcome = DragOutcome::Rejected(reason);
                    None
                }
                Placement::Moved { day, range } => {
                    let next = state.relocate(&key.table, key.index, day, range.clone())?;
                    outcome = DragOutcome::Moved {
                        key: key.clone(),
                        day,
                        range,
                    };
                    Some(next)
                }
            }
        });

        match &outcome {
            DragOutcome::Ignored => debug!("Ignoring drag end for stale key {}", key),
            DragOutcome::Rejected(reason) => debug!("Rejected drag of {}: {}", key, reason),
            DragOutcome::Moved { day, range, .. } => debug!(
                "Moved {} to {} slots {}..={}",
                key,
                day,
                range.start(),
                range.end()
            ),
            DragOutcome::Unchanged => {}
        }
        outcome
    }
}
