//! Modal image viewer.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlImageElement};

use crate::assets::ImageSource;
use crate::config::ElementIds;

use super::image;

/// Handles to the modal's elements. Absent when the page has no modal or
/// no image inside it.
pub(crate) struct ModalView {
    root: HtmlElement,
    image: HtmlImageElement,
    caption: Option<HtmlElement>,
    close_button: Option<HtmlElement>,
}

impl ModalView {
    pub(crate) fn find(document: &Document, ids: &ElementIds) -> Option<Self> {
        let root = element_by_id::<HtmlElement>(document, &ids.modal)?;
        let image = element_by_id::<HtmlImageElement>(document, &ids.modal_image)?;
        Some(Self {
            root,
            image,
            caption: element_by_id(document, &ids.modal_caption),
            close_button: element_by_id(document, &ids.modal_close),
        })
    }

    pub(crate) fn root(&self) -> &HtmlElement {
        &self.root
    }

    pub(crate) fn close_button(&self) -> Option<&HtmlElement> {
        self.close_button.as_ref()
    }

    pub(crate) fn is_open(&self) -> bool {
        self.root.class_list().contains("show")
    }

    pub(crate) fn show(&self, source: &ImageSource, caption: &str) {
        image::load_with_fallback(&self.image, source, "modal");
        if let Some(el) = &self.caption {
            el.set_text_content(Some(caption));
        }
        let _ = self.root.class_list().add_1("show");
        let _ = self.root.set_attribute("aria-hidden", "false");
        if let Some(button) = &self.close_button {
            let _ = button.focus();
        }
        tracing::debug!(key = %source.key, "modal opened");
    }

    pub(crate) fn hide(&self) {
        let _ = self.root.class_list().remove_1("show");
        let _ = self.root.set_attribute("aria-hidden", "true");
        image::clear(&self.image);
        if let Some(el) = &self.caption {
            el.set_text_content(Some(""));
        }
    }
}

pub(crate) fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
}
