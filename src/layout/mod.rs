//! Layout engine for the calendar overlay.
//!
//! This module handles:
//! - Grid geometry and per-cell pixel centers
//! - Converting pixel centers to resolution-independent percentages
//! - Building the complete overlay view-model for a date state

mod grid;
mod overlay;

pub use grid::{CellCenter, GridGeometry};
pub use overlay::{build_overlay, layout_cells};
