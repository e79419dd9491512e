//! Main `AdventCalendar` struct - the browser entry point.
//!
//! This module provides the WASM-exported `AdventCalendar` that handles:
//! - Resolving the unlock state from the clock or a test override
//! - Rendering the background image and overlay through `DomBackend`
//! - The modal viewer, the daily gift button and the test controls
//! - Snowfall, including recycling flakes and rebuilding across the
//!   mobile breakpoint
//!
//! All page state lives in one `SharedState` behind `Rc<RefCell<_>>`; event
//! handlers receive it explicitly instead of reaching for globals.

mod events;
mod resize;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, AnimationEvent, Event, EventTarget, HtmlElement, HtmlInputElement,
    KeyboardEvent,
};

use crate::assets::{day_image_key, ImageKey};
use crate::config::CalendarConfig;
use crate::debounce::{BreakpointWatcher, Debouncer};
use crate::error::{AdventError, Result};
use crate::layout::build_overlay;
use crate::logging::init_console_logging;
use crate::render::dom::{element_by_id, ModalView, SnowfallView, CELL_CLASS};
use crate::render::{render_calendar, DomBackend};
use crate::types::{DateState, OverlayView};
use crate::unlock::{
    parse_test_day, resolve_state, test_day_from_number, test_day_from_query, Clock, SystemClock,
    TestOverride,
};

use resize::DebouncedTimer;

/// Functions exposed on `window` for page controls.
const GLOBAL_FUNCTIONS: [&str; 3] = ["applyTest", "resetTest", "openModalForDay"];

/// Page state shared by every event handler.
pub(crate) struct SharedState {
    pub(crate) config: CalendarConfig,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) date: DateState,
    pub(crate) backend: DomBackend,
    pub(crate) modal: Option<ModalView>,
    pub(crate) test_input: Option<HtmlInputElement>,
    pub(crate) snowfall: Option<SnowfallView>,
    pub(crate) breakpoint: BreakpointWatcher,
    pub(crate) overlay_timer: DebouncedTimer,
    pub(crate) snow_timer: DebouncedTimer,
}

/// An attached DOM listener; detaches itself when dropped.
pub(crate) struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub(crate) fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    pub(crate) fn attach_passive(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .ok()?;
        Some(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

// Timing helper for debounce windows.
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

/// `test_day` from the current page URL, if present and numeric.
pub(crate) fn url_override() -> Option<TestOverride> {
    let search = web_sys::window()?.location().search().ok()?;
    test_day_from_query(&search).map(TestOverride::url)
}

/// Whether the window currently matches the mobile media query.
pub(crate) fn matches_mobile(config: &CalendarConfig) -> bool {
    web_sys::window()
        .and_then(|window| window.match_media(&config.snowfall.mobile_query()).ok().flatten())
        .is_some_and(|query| query.matches())
}

/// The calendar page controller exported to JavaScript.
#[wasm_bindgen]
pub struct AdventCalendar {
    state: Rc<RefCell<SharedState>>,
    #[allow(dead_code)] // Kept alive so the DOM keeps calling into Rust
    listeners: Vec<Listener>,
    globals: Vec<Closure<dyn FnMut(JsValue)>>,
}

#[wasm_bindgen]
impl AdventCalendar {
    /// Create the calendar with default configuration and render it.
    #[wasm_bindgen(constructor)]
    pub fn new() -> std::result::Result<AdventCalendar, JsValue> {
        Ok(Self::build(CalendarConfig::default())?)
    }

    /// Create the calendar from a (partial) configuration object.
    #[wasm_bindgen(js_name = "withConfig")]
    pub fn with_config(config: JsValue) -> std::result::Result<AdventCalendar, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            CalendarConfig::default()
        } else {
            let parsed: CalendarConfig = serde_wasm_bindgen::from_value(config)
                .map_err(|e| AdventError::Config(e.to_string()))?;
            parsed.validate()?;
            parsed
        };
        Ok(Self::build(config)?)
    }

    /// Recompute nothing, redraw everything for the current state.
    pub fn render(&self) {
        Self::render_state(&self.state);
    }

    /// Apply the manual test input; invalid or non-positive input falls
    /// back to the URL override or the real date.
    #[wasm_bindgen(js_name = "applyTest")]
    pub fn apply_test(&self) {
        Self::internal_apply_test(&self.state);
    }

    /// Clear the manual input and the `test_day` parameter, then go back to
    /// the real date.
    #[wasm_bindgen(js_name = "resetTest")]
    pub fn reset_test(&self) {
        Self::internal_reset_test(&self.state);
    }

    /// Open the picture for `day`. Negative numbers clamp to day 0, which
    /// has no picture.
    #[wasm_bindgen(js_name = "openModalForDay")]
    pub fn open_modal_for_day(&self, day: f64) {
        if let Some(day) = test_day_from_number(day) {
            Self::open_modal(&self.state, day);
        }
    }

    #[wasm_bindgen(js_name = "closeModal")]
    pub fn close_modal(&self) {
        Self::internal_close_modal(&self.state);
    }

    #[wasm_bindgen(js_name = "rebuildSnowfall")]
    pub fn rebuild_snowfall(&self) {
        Self::internal_rebuild_snowfall(&self.state);
    }

    /// Current date state as `{ month, day, source }`.
    pub fn state(&self) -> std::result::Result<JsValue, JsValue> {
        let date = self.state.borrow().date;
        serde_wasm_bindgen::to_value(&date)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// The view-model used for the last render, recomputed on demand.
    #[wasm_bindgen(js_name = "overlayView")]
    pub fn overlay_view(&self) -> std::result::Result<JsValue, JsValue> {
        let view = Self::current_view(&self.state.borrow());
        serde_wasm_bindgen::to_value(&view)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Expose `applyTest`, `resetTest` and `openModalForDay` on `window` for
    /// inline page controls.
    #[wasm_bindgen(js_name = "installGlobals")]
    pub fn install_globals(&mut self) -> std::result::Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        self.globals.clear();

        for name in GLOBAL_FUNCTIONS {
            let state = Rc::clone(&self.state);
            let closure = Closure::wrap(Box::new(move |arg: JsValue| match name {
                "applyTest" => Self::internal_apply_test(&state),
                "resetTest" => Self::internal_reset_test(&state),
                _ => {
                    let day = match arg.as_f64() {
                        Some(number) => test_day_from_number(number),
                        None => arg.as_string().and_then(|raw| parse_test_day(&raw)),
                    };
                    if let Some(day) = day {
                        Self::open_modal(&state, day);
                    }
                }
            }) as Box<dyn FnMut(JsValue)>);
            Reflect::set(&window, &JsValue::from_str(name), closure.as_ref())?;
            self.globals.push(closure);
        }
        Ok(())
    }
}

impl AdventCalendar {
    fn build(config: CalendarConfig) -> Result<AdventCalendar> {
        init_console_logging(config.level_filter());

        let window = web_sys::window().ok_or_else(|| AdventError::Dom("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| AdventError::Dom("no document".to_string()))?;

        let clock: Box<dyn Clock> = Box::new(SystemClock);
        let from_url = url_override();
        let date = resolve_state(from_url, clock.as_ref());

        let test_input = element_by_id::<HtmlInputElement>(&document, &config.elements.test_input);
        if let (Some(forced), Some(input)) = (from_url, test_input.as_ref()) {
            input.set_value(&forced.day.to_string());
        }

        let backend = DomBackend::new(document.clone(), &config.elements, config.labels.clone());
        let modal = ModalView::find(&document, &config.elements);

        let is_mobile = matches_mobile(&config);
        let snowfall = if config.snowfall.enabled {
            match SnowfallView::mount(
                &document,
                &config.elements.snowfall,
                config.snowfall.clone(),
                is_mobile,
            ) {
                Ok(mut view) => {
                    if let Err(err) = view.rebuild(is_mobile) {
                        tracing::warn!(%err, "snowfall setup failed");
                    }
                    Some(view)
                }
                Err(err) => {
                    tracing::warn!(%err, "snowfall disabled");
                    None
                }
            }
        } else {
            None
        };

        let overlay_timer = DebouncedTimer::new(Debouncer::new(config.overlay.resize_debounce_ms));
        let snow_timer = DebouncedTimer::new(Debouncer::new(config.snowfall.rebuild_debounce_ms));

        let state = Rc::new(RefCell::new(SharedState {
            config,
            clock,
            date,
            backend,
            modal,
            test_input,
            snowfall,
            breakpoint: BreakpointWatcher::new(is_mobile),
            overlay_timer,
            snow_timer,
        }));

        let listeners = Self::attach_listeners(&state, &window, &document);
        Self::render_state(&state);
        tracing::info!(
            day = date.day(),
            month = date.month(),
            source = ?date.source(),
            "advent calendar ready"
        );

        Ok(AdventCalendar {
            state,
            listeners,
            globals: Vec::new(),
        })
    }

    fn attach_listeners(
        state: &Rc<RefCell<SharedState>>,
        window: &web_sys::Window,
        document: &web_sys::Document,
    ) -> Vec<Listener> {
        let mut listeners = Vec::new();
        let s = state.borrow();

        // Overlay cells (delegated)
        if let Some(overlay) = s.backend.overlay() {
            let state = Rc::clone(state);
            let target: &EventTarget = overlay.as_ref();
            listeners.extend(Listener::attach(target, "click", move |event: Event| {
                let cell = event
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                    .and_then(|el| el.closest(&format!(".{CELL_CLASS}")).ok().flatten())
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok());
                let Some(cell) = cell else {
                    return;
                };
                let day = cell
                    .get_attribute("data-day")
                    .and_then(|raw| raw.parse::<u32>().ok());
                if let Some(day) = day {
                    Self::internal_cell_click(&state, day, &cell);
                }
            }));
        }

        // Background image finished loading: cells can now be measured
        if let Some(img) = s.backend.calendar_image() {
            let state = Rc::clone(state);
            let target: &EventTarget = img.as_ref();
            listeners.extend(Listener::attach(target, "load", move |_event: Event| {
                Self::render_state(&state);
            }));
        }

        // Modal: backdrop, close button
        if let Some(modal) = s.modal.as_ref() {
            let root = modal.root().clone();
            let state_for_backdrop = Rc::clone(state);
            let target: &EventTarget = modal.root().as_ref();
            listeners.extend(Listener::attach(target, "click", move |event: Event| {
                let on_backdrop = event
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
                    .is_some_and(|node| node.is_same_node(Some(root.as_ref())));
                if on_backdrop {
                    Self::internal_close_modal(&state_for_backdrop);
                }
            }));

            if let Some(button) = modal.close_button() {
                let state = Rc::clone(state);
                let target: &EventTarget = button.as_ref();
                listeners.extend(Listener::attach(target, "click", move |_event: Event| {
                    Self::internal_close_modal(&state);
                }));
            }
        }

        // Escape closes the modal
        {
            let state = Rc::clone(state);
            let target: &EventTarget = document.as_ref();
            listeners.extend(Listener::attach(target, "keydown", move |event: Event| {
                let is_escape = event
                    .dyn_ref::<KeyboardEvent>()
                    .is_some_and(|key| key.key() == "Escape");
                if is_escape {
                    Self::internal_close_modal(&state);
                }
            }));
        }

        // Daily gift
        if let Some(button) =
            element_by_id::<HtmlElement>(document, &s.config.elements.gift_button)
        {
            let state = Rc::clone(state);
            let target: &EventTarget = button.as_ref();
            listeners.extend(Listener::attach(target, "click", move |_event: Event| {
                Self::internal_daily_gift(&state);
            }));
        }

        // Snowfall recycling (delegated to the container)
        if let Some(snowfall) = s.snowfall.as_ref() {
            let state = Rc::clone(state);
            let target: &EventTarget = snowfall.container().as_ref();
            listeners.extend(Listener::attach(target, "animationend", move |event: Event| {
                if let Some(event) = event.dyn_ref::<AnimationEvent>() {
                    Self::internal_animation_end(&state, event);
                }
            }));
        }

        // Resize (overlay re-render + breakpoint-crossing snowfall rebuild)
        {
            let state = Rc::clone(state);
            let target: &EventTarget = window.as_ref();
            listeners.extend(Listener::attach_passive(target, "resize", move |_event: Event| {
                Self::internal_resize(&state);
            }));
        }

        listeners
    }

    pub(crate) fn current_view(s: &SharedState) -> OverlayView {
        let bounds = s.backend.overlay_bounds();
        if bounds.is_degenerate() {
            // Image not laid out yet; the load listener renders again.
            tracing::debug!(?bounds, "overlay has no size yet");
        }
        build_overlay(&s.date, &s.config.grid, &s.config.assets, bounds)
    }

    /// Clear and rebuild the background and overlay for the current state.
    pub(crate) fn render_state(state: &Rc<RefCell<SharedState>>) {
        let mut guard = state.borrow_mut();
        let s = &mut *guard;
        let view = Self::current_view(s);
        if let Err(err) = render_calendar(&mut s.backend, &view) {
            tracing::warn!(%err, "calendar render failed");
            return;
        }
        tracing::debug!(
            unlocked = view.unlocked,
            background = %view.background.key,
            "calendar rendered"
        );
    }

    /// Show the modal for `day`: its own picture for 1..=25, the final
    /// picture afterwards. Day 0 is ignored.
    pub(crate) fn open_modal(state: &Rc<RefCell<SharedState>>, day: u32) {
        let s = state.borrow();
        let Some(modal) = s.modal.as_ref() else {
            return;
        };
        let Some(key) = day_image_key(day) else {
            return;
        };
        let caption = match key {
            ImageKey::Final => s.config.labels.final_caption.clone(),
            _ => s.config.labels.day_caption(day),
        };
        modal.show(&s.config.assets.source(key), &caption);
    }
}

impl Drop for AdventCalendar {
    fn drop(&mut self) {
        if self.globals.is_empty() {
            return;
        }
        if let Some(window) = web_sys::window() {
            for name in GLOBAL_FUNCTIONS {
                let _ = Reflect::delete_property(&window, &JsValue::from_str(name));
            }
        }
    }
}

/// Build the calendar, install the page globals and return the handle.
///
/// The page must keep the returned object alive; dropping it detaches
/// every listener.
#[wasm_bindgen]
pub fn start() -> std::result::Result<AdventCalendar, JsValue> {
    let mut calendar = AdventCalendar::new()?;
    calendar.install_globals()?;
    Ok(calendar)
}
