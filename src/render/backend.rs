//! Render backend trait for pluggable calendar output.
//!
//! The overlay layout produces a pure [`OverlayView`]; a backend turns it
//! into pixels, DOM nodes or text. Every call fully replaces the previous
//! output.

use crate::assets::ImageSource;
use crate::error::Result;
use crate::types::OverlayView;

pub trait CalendarBackend {
    /// Show the background calendar picture.
    fn set_background(&mut self, source: &ImageSource) -> Result<()>;

    /// Clear and rebuild every day cell.
    fn render_overlay(&mut self, view: &OverlayView) -> Result<()>;

    /// Warm up images for unlocked days. Fire-and-forget.
    fn preload(&mut self, sources: &[ImageSource]);
}

/// Drive a backend through one full render pass.
pub fn render_calendar<B: CalendarBackend + ?Sized>(backend: &mut B, view: &OverlayView) -> Result<()> {
    backend.set_background(&view.background)?;
    backend.render_overlay(view)?;
    backend.preload(&view.preload);
    Ok(())
}
