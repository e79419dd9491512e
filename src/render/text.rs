//! Plain-text backend used by the CLI.

use std::fmt::Write as _;

use crate::assets::ImageSource;
use crate::error::Result;
use crate::types::OverlayView;

use super::CalendarBackend;

/// Renders the overlay as a character grid: `[07]` unlocked, ` 07 ` locked.
#[derive(Debug, Default)]
pub struct TextBackend {
    out: String,
}

impl TextBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    pub fn into_output(self) -> String {
        self.out
    }
}

impl CalendarBackend for TextBackend {
    fn set_background(&mut self, source: &ImageSource) -> Result<()> {
        self.out.clear();
        let _ = writeln!(self.out, "background: {}", source.describe());
        Ok(())
    }

    fn render_overlay(&mut self, view: &OverlayView) -> Result<()> {
        let mut current_row = None;
        for cell in &view.cells {
            if current_row.is_some_and(|row| row != cell.row) {
                self.out.push('\n');
            }
            current_row = Some(cell.row);
            if cell.unlocked {
                let _ = write!(self.out, "[{:02}]", cell.day);
            } else {
                let _ = write!(self.out, " {:02} ", cell.day);
            }
        }
        if current_row.is_some() {
            self.out.push('\n');
        }
        let _ = writeln!(
            self.out,
            "unlocked: {}/{}",
            view.unlocked_cells().count(),
            view.cells.len()
        );
        Ok(())
    }

    fn preload(&mut self, sources: &[ImageSource]) {
        if sources.is_empty() {
            return;
        }
        let keys: Vec<&str> = sources.iter().map(|s| s.key.as_str()).collect();
        let _ = writeln!(self.out, "preload: {}", keys.join(", "));
    }
}
