//! Live-drag feedback: snapping and container clamping.

use serde::{Deserialize, Serialize};

use super::{GridGeometry, PixelDelta};

/// Axis-aligned rectangle in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Snap a raw pointer delta to whole cells.
pub fn snap_offset(delta: PixelDelta, grid: &GridGeometry) -> PixelDelta {
    PixelDelta {
        x: f64::from(grid.day_steps(delta.x)) * grid.cell_width,
        y: f64::from(grid.time_steps(delta.y)) * grid.cell_height,
    }
}

/// Keep a dragged block inside the container's drawable region.
///
/// The block may not cover the time-label column or the header row, and may
/// not pass the container's right or bottom edge.
pub fn clamp_to_container(
    delta: PixelDelta,
    container: &Rect,
    dragged: &Rect,
    grid: &GridGeometry,
) -> PixelDelta {
    let min_x = container.left - dragged.left + grid.time_column_width + 1.0;
    let min_y = container.top - dragged.top + grid.header_height + 1.0;
    let max_x = container.right - dragged.right;
    let max_y = container.bottom - dragged.bottom;

    PixelDelta {
        x: delta.x.max(min_x).min(max_x),
        y: delta.y.max(min_y).min(max_y),
    }
}

/// Offset to draw the dragged block at: snapped, then clamped.
pub fn live_offset(
    delta: PixelDelta,
    container: &Rect,
    dragged: &Rect,
    grid: &GridGeometry,
) -> PixelDelta {
    clamp_to_container(snap_offset(delta, grid), container, dragged, grid)
}
