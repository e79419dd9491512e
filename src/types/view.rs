//! View-model types produced by the overlay layout.

use serde::{Deserialize, Serialize};

use crate::assets::ImageSource;

/// Measured size of the overlay container in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side measured as zero (or garbage).
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// One door of the calendar, positioned inside the overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCellView {
    /// Day number, 1-based.
    pub day: u32,
    pub unlocked: bool,
    /// Grid row (0-based)
    pub row: u32,
    /// Grid column (0-based)
    pub col: u32,
    /// Cell center in container pixels.
    pub center_x_px: f64,
    pub center_y_px: f64,
    /// Cell center as a percentage of the container, for CSS `left`/`top`.
    pub left_percent: f64,
    pub top_percent: f64,
    /// Cell width as a percentage of the container width.
    pub width_percent: f64,
}

/// Everything a backend needs to draw the calendar for one state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayView {
    /// Unlocked day count (may exceed the number of cells late in December).
    pub unlocked: u32,
    pub background: ImageSource,
    /// Cells for days 1..=25, in day order.
    pub cells: Vec<DayCellView>,
    /// Day images to warm up, days 1..=min(unlocked, 25).
    pub preload: Vec<ImageSource>,
}

impl OverlayView {
    pub fn cell(&self, day: u32) -> Option<&DayCellView> {
        self.cells.iter().find(|cell| cell.day == day)
    }

    pub fn unlocked_cells(&self) -> impl Iterator<Item = &DayCellView> {
        self.cells.iter().filter(|cell| cell.unlocked)
    }
}
