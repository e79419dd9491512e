//! Pure overlay view-model: `(DateState, GridGeometry, Bounds) -> cells`.
//!
//! Nothing here touches the DOM. Backends receive an [`OverlayView`] and
//! rebuild their output from scratch, so rendering the same inputs twice
//! yields the same picture.

use crate::assets::{background_key, day_image_key, AssetConfig};
use crate::types::{Bounds, DateState, DayCellView, OverlayView, TOTAL_DAYS};

use super::GridGeometry;

/// Position every day cell and mark it locked or unlocked.
///
/// A zero-sized container yields 0% positions rather than an error.
pub fn layout_cells(state: &DateState, geometry: &GridGeometry, bounds: Bounds) -> Vec<DayCellView> {
    let unlocked = state.unlocked_days();

    (1..=TOTAL_DAYS)
        .filter_map(|day| {
            let center = geometry.cell_center(day, bounds)?;
            Some(DayCellView {
                day,
                unlocked: day <= unlocked,
                row: center.row,
                col: center.col,
                center_x_px: center.x,
                center_y_px: center.y,
                left_percent: percent_of(center.x, bounds.width),
                top_percent: percent_of(center.y, bounds.height),
                width_percent: geometry.cell_width_percent,
            })
        })
        .collect()
}

/// Full view-model for one render pass: background, cells and preloads.
pub fn build_overlay(
    state: &DateState,
    geometry: &GridGeometry,
    assets: &AssetConfig,
    bounds: Bounds,
) -> OverlayView {
    let unlocked = state.unlocked_days();
    let preload = (1..=unlocked.min(TOTAL_DAYS))
        .filter_map(day_image_key)
        .map(|key| assets.source(key))
        .collect();

    OverlayView {
        unlocked,
        background: assets.source(background_key(state)),
        cells: layout_cells(state, geometry, bounds),
        preload,
    }
}

fn percent_of(value: f64, total: f64) -> f64 {
    if total.is_finite() && total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}
