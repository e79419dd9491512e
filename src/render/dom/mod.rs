//! DOM backend: the background `<img>` plus an absolutely positioned overlay
//! of day buttons.
//!
//! The overlay container is looked up by id and created next to the
//! calendar image when the page does not provide one. A page without the
//! calendar image still renders cells if it has an overlay element.

mod image;
mod modal;
mod snow;

pub(crate) use modal::{element_by_id, ModalView};
pub(crate) use snow::SnowfallView;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlImageElement};

use crate::assets::ImageSource;
use crate::config::{ElementIds, LabelConfig};
use crate::error::{AdventError, Result};
use crate::types::{Bounds, DayCellView, OverlayView};

use super::CalendarBackend;

/// Class on every day button.
pub const CELL_CLASS: &str = "day-cell";

pub struct DomBackend {
    document: Document,
    calendar_image: Option<HtmlImageElement>,
    overlay: Option<HtmlElement>,
    labels: LabelConfig,
}

impl DomBackend {
    pub fn new(document: Document, ids: &ElementIds, labels: LabelConfig) -> Self {
        let calendar_image = element_by_id::<HtmlImageElement>(&document, &ids.calendar_image);
        let overlay = element_by_id::<HtmlElement>(&document, &ids.overlay).or_else(|| {
            calendar_image
                .as_ref()
                .and_then(|img| create_overlay(&document, img, &ids.overlay).ok())
        });
        if overlay.is_none() {
            tracing::debug!("no overlay container; day cells disabled");
        }
        Self {
            document,
            calendar_image,
            overlay,
            labels,
        }
    }

    pub fn calendar_image(&self) -> Option<&HtmlImageElement> {
        self.calendar_image.as_ref()
    }

    pub fn overlay(&self) -> Option<&HtmlElement> {
        self.overlay.as_ref()
    }

    /// Current size of the overlay container, zero when it is missing.
    pub fn overlay_bounds(&self) -> Bounds {
        self.overlay
            .as_ref()
            .map(|overlay| {
                let rect = overlay.get_bounding_client_rect();
                Bounds::new(rect.width(), rect.height())
            })
            .unwrap_or_default()
    }

    fn build_cell(&self, cell: &DayCellView) -> Result<HtmlElement> {
        let button: HtmlElement = self
            .document
            .create_element("button")?
            .dyn_into()
            .map_err(|_| AdventError::Dom("created cell is not an HTMLElement".to_string()))?;

        let state_class = if cell.unlocked { "unlocked" } else { "locked" };
        button.set_class_name(&format!("{CELL_CLASS} {state_class}"));
        button.set_attribute("type", "button")?;
        button.set_attribute("data-day", &cell.day.to_string())?;
        button.set_attribute("aria-label", &self.labels.cell_label(cell.day, cell.unlocked))?;
        if !cell.unlocked {
            button.set_attribute("aria-disabled", "true")?;
        }
        button.set_text_content(Some(&cell.day.to_string()));

        let style = button.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", &format!("{:.4}%", cell.left_percent))?;
        style.set_property("top", &format!("{:.4}%", cell.top_percent))?;
        style.set_property("width", &format!("{:.4}%", cell.width_percent))?;
        style.set_property("transform", "translate(-50%, -50%)")?;
        Ok(button)
    }
}

impl CalendarBackend for DomBackend {
    fn set_background(&mut self, source: &ImageSource) -> Result<()> {
        let Some(img) = &self.calendar_image else {
            return Ok(());
        };
        let current = img.get_attribute("data-current-key");
        if current.as_deref() == Some(source.key.as_str()) {
            return Ok(());
        }
        img.set_attribute("data-current-key", &source.key)?;
        image::load_with_fallback(img, source, "calendar");
        Ok(())
    }

    fn render_overlay(&mut self, view: &OverlayView) -> Result<()> {
        let Some(overlay) = &self.overlay else {
            return Ok(());
        };
        overlay.set_inner_html("");
        for cell in &view.cells {
            let button = self.build_cell(cell)?;
            overlay.append_child(&button)?;
        }
        Ok(())
    }

    fn preload(&mut self, sources: &[ImageSource]) {
        for source in sources {
            image::preload(source);
        }
    }
}

fn create_overlay(document: &Document, img: &HtmlImageElement, id: &str) -> Result<HtmlElement> {
    let parent = img
        .parent_element()
        .ok_or_else(|| AdventError::Dom("calendar image has no parent".to_string()))?;
    let overlay: HtmlElement = document
        .create_element("div")?
        .dyn_into()
        .map_err(|_| AdventError::Dom("created overlay is not an HTMLElement".to_string()))?;
    overlay.set_id(id);
    overlay.set_class_name("calendar-overlay");
    let style = overlay.style();
    style.set_property("position", "absolute")?;
    style.set_property("inset", "0")?;
    parent.append_child(&overlay)?;
    Ok(overlay)
}
