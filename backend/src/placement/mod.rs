//! Grid-snapped drag relocation.
//!
//! A drag ends with a continuous pixel delta. This module turns it into a
//! discrete move of whole days (columns) and time slots (rows):
//!
//! ```text
//! day_delta  = round(dx / cell_width)
//! time_delta = round(dy / cell_height)
//! ```
//!
//! [`snap_steps`] is the single rounding rule. Live feedback
//! ([`snap::snap_offset`]) and the commit ([`plan_relocation`]) both call it, so
//! the block lands where the preview showed it.

pub mod snap;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Day, ScheduleEntry, TableId, TimeRange};

pub use snap::{clamp_to_container, live_offset, snap_offset, Rect};

/// Pixel geometry of one schedule table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Width of one day column
    pub cell_width: f64,
    /// Height of one time-slot row
    pub cell_height: f64,
    /// Width of the time-label column left of the first day
    pub time_column_width: f64,
    /// Height of the day-label header row
    pub header_height: f64,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            cell_width: 80.0,
            cell_height: 30.0,
            time_column_width: 120.0,
            header_height: 40.0,
        }
    }
}

impl GridGeometry {
    pub fn day_steps(&self, dx: f64) -> i32 {
        snap_steps(dx, self.cell_width)
    }

    pub fn time_steps(&self, dy: f64) -> i32 {
        snap_steps(dy, self.cell_height)
    }
}

/// Whole cells covered by a pixel offset, rounded to nearest (half away from zero).
///
/// A non-positive or non-finite cell size yields zero steps.
pub fn snap_steps(delta: f64, cell: f64) -> i32 {
    if !(cell.is_finite() && cell > 0.0) {
        return 0;
    }
    let steps = (delta / cell).round();
    if steps.is_nan() {
        return 0;
    }
    steps.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// Pointer movement between drag start and drag end.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelDelta {
    pub x: f64,
    pub y: f64,
}

impl PixelDelta {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Drag-end event from the interaction layer.
///
/// `delta` is already clamped to the table's drawable region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEnd {
    /// `"<table id>:<entry index>"`
    pub source_key: String,
    pub delta: PixelDelta,
}

/// Parsed form of a draggable block's key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub table: TableId,
    pub index: usize,
}

impl SourceKey {
    pub fn new(table: TableId, index: usize) -> Self {
        Self { table, index }
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.table, self.index)
    }
}

impl FromStr for SourceKey {
    type Err = PlacementError;

    /// Splits on the last `:` so table ids may themselves contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlacementError::InvalidSourceKey(s.to_string());
        let (table, index) = s.rsplit_once(':').ok_or_else(invalid)?;
        if table.is_empty() {
            return Err(invalid());
        }
        let index = index.parse().map_err(|_| invalid())?;
        Ok(Self::new(TableId::from(table), index))
    }
}

/// Table currently being dragged from, for highlighting.
pub fn active_table_id(source_key: &str) -> Option<TableId> {
    source_key.parse::<SourceKey>().ok().map(|key| key.table)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("invalid drag source key '{0}', expected '<table>:<index>'")]
    InvalidSourceKey(String),
}

/// Why a non-zero move was not committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementRejection {
    /// The target column is before the first or after the last day.
    DayOutOfBounds { from: Day, delta: i32 },
    /// Some shifted slot would leave the time grid.
    TimeOutOfBounds { from: TimeRange, delta: i32 },
}

impl fmt::Display for PlacementRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementRejection::DayOutOfBounds { from, delta } => {
                write!(f, "moving {} by {} days leaves the week", from, delta)
            }
            PlacementRejection::TimeOutOfBounds { from, delta } => write!(
                f,
                "moving slots {}..={} by {} leaves the time grid",
                from.start(),
                from.end(),
                delta
            ),
        }
    }
}

/// Result of planning a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Placement {
    /// Snapped delta is zero on both axes; nothing to write.
    Unchanged,
    Moved { day: Day, range: TimeRange },
    Rejected(PlacementRejection),
}

/// Plan where a dragged entry lands.
pub fn plan_relocation(entry: &ScheduleEntry, delta: PixelDelta, grid: &GridGeometry) -> Placement {
    let day_delta = grid.day_steps(delta.x);
    let time_delta = grid.time_steps(delta.y);
    if day_delta == 0 && time_delta == 0 {
        return Placement::Unchanged;
    }

    let Some(day) = entry.day.offset(day_delta) else {
        return Placement::Rejected(PlacementRejection::DayOutOfBounds {
            from: entry.day,
            delta: day_delta,
        });
    };
    let Some(range) = entry.range.shifted(time_delta) else {
        return Placement::Rejected(PlacementRejection::TimeOutOfBounds {
            from: entry.range.clone(),
            delta: time_delta,
        });
    };
    Placement::Moved { day, range }
}
