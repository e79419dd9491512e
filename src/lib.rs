//! advent - seasonal advent calendar page for the web
//!
//! Drives the calendar page in the browser via WebAssembly:
//! - Unlock state from the local date or a `test_day` override
//! - A pure overlay view-model positioning 25 doors over the artwork
//! - DOM rendering, modal viewer and daily gift button
//! - Self-recycling snowfall decoration
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { start } from './pkg/advent.js';
//! await init();
//! window.calendar = start();
//! ```

pub mod assets;
pub mod config;
pub mod debounce;
pub mod error;
pub mod layout;
pub mod logging;
pub mod render;
pub mod snowfall;
pub mod types;
pub mod unlock;

// Browser entry point (DOM wiring)
#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::{start, AdventCalendar};

pub use config::CalendarConfig;
pub use error::{AdventError, Result};
pub use types::*;

use crate::unlock::{parse_test_day, resolve_state, test_day_from_number, SystemClock, TestOverride};

/// Compute the overlay view-model without touching the DOM.
///
/// # Arguments
/// * `test_day` - Optional forced December day (clamped to 0..=31; negative
///   numbers give day 0)
/// * `width`, `height` - Container size in CSS pixels
/// * `config` - Optional partial configuration object
///
/// # Errors
/// Returns an error if the configuration is invalid.
#[wasm_bindgen(js_name = "layoutOverlay")]
pub fn layout_overlay(
    test_day: Option<f64>,
    width: f64,
    height: f64,
    config: JsValue,
) -> std::result::Result<JsValue, JsValue> {
    let config = if config.is_undefined() || config.is_null() {
        CalendarConfig::default()
    } else {
        serde_wasm_bindgen::from_value::<CalendarConfig>(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {e}")))?
    };
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let forced = test_day
        .and_then(test_day_from_number)
        .map(TestOverride::url);
    let state = resolve_state(forced, &SystemClock);
    let view = layout::build_overlay(
        &state,
        &config.grid,
        &config.assets,
        Bounds::new(width, height),
    );
    serde_wasm_bindgen::to_value(&view)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Parse a raw `test_day` value the way the page does.
#[must_use]
#[wasm_bindgen(js_name = "resolveTestDay")]
pub fn resolve_test_day(raw: &str) -> Option<u32> {
    parse_test_day(raw)
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
