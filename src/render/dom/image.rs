//! Image loading with extension fallback.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

use crate::assets::ImageSource;

/// Point `img` at the first candidate and walk the remaining ones on `error`.
///
/// Gives up with a warning once every candidate failed. There is no retry
/// beyond the candidate list.
pub(crate) fn load_with_fallback(img: &HtmlImageElement, source: &ImageSource, context: &'static str) {
    let candidates: Rc<[String]> = source.candidates.clone().into();
    try_candidate(img.clone(), candidates, 0, context);
}

/// Start a detached load so the browser caches the image.
pub(crate) fn preload(source: &ImageSource) {
    match HtmlImageElement::new() {
        Ok(img) => load_with_fallback(&img, source, "preload"),
        Err(err) => tracing::debug!(key = %source.key, ?err, "image preload unavailable"),
    }
}

fn try_candidate(img: HtmlImageElement, candidates: Rc<[String]>, index: usize, context: &'static str) {
    img.set_onerror(None);
    let Some(src) = candidates.get(index).cloned() else {
        tracing::warn!(
            context,
            tried = %candidates.join(" / "),
            "could not load image from any candidate"
        );
        return;
    };

    let next_img = img.clone();
    let next_candidates = Rc::clone(&candidates);
    let on_error = Closure::once_into_js(move || {
        try_candidate(next_img, next_candidates, index + 1, context);
    });
    img.set_onerror(Some(on_error.unchecked_ref()));
    img.set_src(&src);
}

/// Stop any pending fallback chain and blank the image.
pub(crate) fn clear(img: &HtmlImageElement) {
    img.set_onerror(None);
    img.set_src("");
}
