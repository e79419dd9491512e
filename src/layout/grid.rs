//! Fixed grid geometry for the calendar doors.
//!
//! The grid is laid over the background picture, so the doors rarely sit on
//! a perfectly regular lattice. Per-row and per-column pixel offsets nudge
//! each cell onto the artwork without touching the lattice math.

use serde::{Deserialize, Serialize};

use crate::error::{AdventError, Result};
use crate::types::{Bounds, TOTAL_DAYS};

/// Grid constants describing where the doors sit inside the container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridGeometry {
    pub columns: u32,
    pub rows: u32,
    /// Inset from every container edge, in pixels.
    pub padding_px: f64,
    /// Rendered cell width as a percentage of the container width.
    pub cell_width_percent: f64,
    /// Vertical nudge per row (`len == rows`).
    pub row_offsets_px: Vec<f64>,
    /// Horizontal nudge per column (`len == columns`).
    pub col_offsets_px: Vec<f64>,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            columns: 5,
            rows: 5,
            padding_px: 24.0,
            cell_width_percent: 14.0,
            row_offsets_px: vec![0.0; 5],
            col_offsets_px: vec![0.0; 5],
        }
    }
}

/// Center of a cell in container pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellCenter {
    pub row: u32,
    pub col: u32,
    pub x: f64,
    pub y: f64,
}

impl GridGeometry {
    /// Build a geometry, rejecting inconsistent offsets or a grid too small
    /// for every day.
    pub fn new(
        columns: u32,
        rows: u32,
        padding_px: f64,
        cell_width_percent: f64,
        row_offsets_px: Vec<f64>,
        col_offsets_px: Vec<f64>,
    ) -> Result<Self> {
        let geometry = Self {
            columns,
            rows,
            padding_px,
            cell_width_percent,
            row_offsets_px,
            col_offsets_px,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Uniform grid with zero offsets.
    pub fn uniform(columns: u32, rows: u32, padding_px: f64) -> Result<Self> {
        let cell_width_percent = if columns == 0 {
            0.0
        } else {
            70.0 / f64::from(columns)
        };
        Self::new(
            columns,
            rows,
            padding_px,
            cell_width_percent,
            vec![0.0; rows as usize],
            vec![0.0; columns as usize],
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(AdventError::InvalidGeometry(format!(
                "grid must have at least one row and column (got {}x{})",
                self.columns, self.rows
            )));
        }
        if self.columns.saturating_mul(self.rows) < TOTAL_DAYS {
            return Err(AdventError::InvalidGeometry(format!(
                "{}x{} grid cannot hold {TOTAL_DAYS} days",
                self.columns, self.rows
            )));
        }
        if self.row_offsets_px.len() != self.rows as usize {
            return Err(AdventError::InvalidGeometry(format!(
                "expected {} row offsets, got {}",
                self.rows,
                self.row_offsets_px.len()
            )));
        }
        if self.col_offsets_px.len() != self.columns as usize {
            return Err(AdventError::InvalidGeometry(format!(
                "expected {} column offsets, got {}",
                self.columns,
                self.col_offsets_px.len()
            )));
        }
        if !self.padding_px.is_finite() || self.padding_px < 0.0 {
            return Err(AdventError::InvalidGeometry(format!(
                "padding must be a non-negative number (got {})",
                self.padding_px
            )));
        }
        if !self.cell_width_percent.is_finite() || self.cell_width_percent < 0.0 {
            return Err(AdventError::InvalidGeometry(format!(
                "cell width must be a non-negative percentage (got {})",
                self.cell_width_percent
            )));
        }
        let offsets_finite = self
            .row_offsets_px
            .iter()
            .chain(self.col_offsets_px.iter())
            .all(|v| v.is_finite());
        if !offsets_finite {
            return Err(AdventError::InvalidGeometry(
                "offsets must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Area left for cells after padding, floored at zero.
    pub fn usable_area(&self, bounds: Bounds) -> (f64, f64) {
        let inset = 2.0 * self.padding_px;
        (
            (bounds.width - inset).max(0.0),
            (bounds.height - inset).max(0.0),
        )
    }

    /// Size of one lattice cell for the given container.
    pub fn cell_size(&self, bounds: Bounds) -> (f64, f64) {
        let (usable_w, usable_h) = self.usable_area(bounds);
        (
            usable_w / f64::from(self.columns.max(1)),
            usable_h / f64::from(self.rows.max(1)),
        )
    }

    /// Center of the cell for `day` (1-based). `None` for day 0.
    pub fn cell_center(&self, day: u32, bounds: Bounds) -> Option<CellCenter> {
        let index = day.checked_sub(1)?;
        let columns = self.columns.max(1);
        let col = index % columns;
        let row = index / columns;
        let (cell_w, cell_h) = self.cell_size(bounds);

        let col_offset = self.col_offsets_px.get(col as usize).copied().unwrap_or(0.0);
        let row_offset = self.row_offsets_px.get(row as usize).copied().unwrap_or(0.0);

        Some(CellCenter {
            row,
            col,
            x: self.padding_px + (f64::from(col) + 0.5) * cell_w + col_offset,
            y: self.padding_px + (f64::from(row) + 0.5) * cell_h + row_offset,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_geometry_is_valid() {
        assert!(GridGeometry::default().validate().is_ok());
    }

    #[test]
    fn test_offset_length_mismatch_rejected() {
        let err = GridGeometry::new(5, 5, 24.0, 14.0, vec![0.0; 4], vec![0.0; 5]);
        assert!(matches!(err, Err(AdventError::InvalidGeometry(_))));

        let err = GridGeometry::new(5, 5, 24.0, 14.0, vec![0.0; 5], vec![0.0; 6]);
        assert!(matches!(err, Err(AdventError::InvalidGeometry(_))));
    }

    #[test]
    fn test_grid_too_small_rejected() {
        assert!(GridGeometry::uniform(4, 6, 0.0).is_err());
        assert!(GridGeometry::uniform(0, 30, 0.0).is_err());
        assert!(GridGeometry::uniform(7, 4, 0.0).is_ok());
    }

    #[test]
    fn test_negative_padding_rejected() {
        assert!(GridGeometry::new(5, 5, -1.0, 14.0, vec![0.0; 5], vec![0.0; 5]).is_err());
        assert!(GridGeometry::new(5, 5, f64::NAN, 14.0, vec![0.0; 5], vec![0.0; 5]).is_err());
    }

    #[test]
    fn test_usable_area_floors_at_zero() {
        let grid = GridGeometry::default();
        assert_eq!(grid.usable_area(Bounds::new(30.0, 10.0)), (0.0, 0.0));
    }

    #[test]
    fn test_cell_center_walks_row_major() {
        let grid = GridGeometry::default();
        let bounds = Bounds::new(1000.0, 800.0);
        let (cell_w, cell_h) = grid.cell_size(bounds);
        assert!(close(cell_w, 190.4));
        assert!(close(cell_h, 150.4));

        let first = grid.cell_center(1, bounds).unwrap();
        assert_eq!((first.row, first.col), (0, 0));
        assert!(close(first.x, 24.0 + 95.2));
        assert!(close(first.y, 24.0 + 75.2));

        let sixth = grid.cell_center(6, bounds).unwrap();
        assert_eq!((sixth.row, sixth.col), (1, 0));

        let last = grid.cell_center(25, bounds).unwrap();
        assert_eq!((last.row, last.col), (4, 4));
        assert!(close(last.x, 1000.0 - 24.0 - 95.2));
    }

    #[test]
    fn test_offsets_are_applied() {
        let grid = GridGeometry::new(
            5,
            5,
            0.0,
            14.0,
            vec![0.0, 10.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, -5.0, 0.0, 0.0],
        )
        .unwrap();
        let bounds = Bounds::new(500.0, 500.0);
        let center = grid.cell_center(8, bounds).unwrap();
        assert_eq!((center.row, center.col), (1, 2));
        assert!(close(center.x, 250.0 - 5.0));
        assert!(close(center.y, 150.0 + 10.0));
    }

    #[test]
    fn test_day_zero_has_no_cell() {
        assert!(GridGeometry::default()
            .cell_center(0, Bounds::new(100.0, 100.0))
            .is_none());
    }
}
