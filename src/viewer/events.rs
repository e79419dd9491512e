//! Click, keyboard, animation and test-control handlers for `AdventCalendar`.
//!
//! All methods here are `pub(crate)` helpers called from the listeners and
//! the wasm-exported API in `mod.rs`. Each one borrows the shared state for
//! as short a time as possible and releases it before rendering.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AnimationEvent, HtmlElement};

use super::{matches_mobile, url_override, AdventCalendar, SharedState};
use crate::types::TOTAL_DAYS;
use crate::unlock::{daily_gift, manual_override, resolve_state, GiftOutcome, TEST_DAY_PARAM};

impl AdventCalendar {
    pub(crate) fn internal_apply_test(state: &Rc<RefCell<SharedState>>) {
        {
            let mut s = state.borrow_mut();
            let raw = s
                .test_input
                .as_ref()
                .map(|input| input.value())
                .unwrap_or_default();
            let forced = manual_override(&raw).or_else(url_override);
            let date = resolve_state(forced, s.clock.as_ref());
            s.date = date;
            tracing::debug!(input = %raw, day = s.date.day(), source = ?s.date.source(), "test override applied");
        }
        Self::render_state(state);
    }

    pub(crate) fn internal_reset_test(state: &Rc<RefCell<SharedState>>) {
        {
            let mut s = state.borrow_mut();
            if let Some(input) = &s.test_input {
                input.set_value("");
            }
            strip_test_day_from_url();
            let date = resolve_state(None, s.clock.as_ref());
            s.date = date;
            tracing::debug!(day = s.date.day(), month = s.date.month(), "test override reset");
        }
        Self::render_state(state);
    }

    pub(crate) fn internal_close_modal(state: &Rc<RefCell<SharedState>>) {
        let s = state.borrow();
        if let Some(modal) = s.modal.as_ref() {
            if modal.is_open() {
                modal.hide();
            }
        }
    }

    pub(crate) fn internal_cell_click(
        state: &Rc<RefCell<SharedState>>,
        day: u32,
        cell: &HtmlElement,
    ) {
        let (unlocked, shake_ms) = {
            let s = state.borrow();
            (s.date.is_unlocked(day), s.config.overlay.locked_shake_ms)
        };
        if unlocked {
            Self::open_modal(state, day);
        } else {
            tracing::debug!(day, "locked day clicked");
            shake(cell, shake_ms);
        }
    }

    /// The gift button always follows the real date, never a test override.
    pub(crate) fn internal_daily_gift(state: &Rc<RefCell<SharedState>>) {
        let (outcome, labels) = {
            let s = state.borrow();
            (daily_gift(s.clock.today()), s.config.labels.clone())
        };
        tracing::debug!(?outcome, "daily gift requested");

        match outcome {
            GiftOutcome::OutOfSeason => alert(&labels.gift_out_of_season),
            GiftOutcome::NotStarted => alert(&labels.gift_not_started),
            GiftOutcome::Day(day) => Self::open_modal(state, day),
            GiftOutcome::Final => Self::open_modal(state, TOTAL_DAYS + 1),
        }
    }

    pub(crate) fn internal_animation_end(state: &Rc<RefCell<SharedState>>, event: &AnimationEvent) {
        let mut s = state.borrow_mut();
        if let Some(snowfall) = s.snowfall.as_mut() {
            snowfall.recycle(event);
        }
    }

    pub(crate) fn internal_rebuild_snowfall(state: &Rc<RefCell<SharedState>>) {
        let mut guard = state.borrow_mut();
        let s = &mut *guard;
        let is_mobile = matches_mobile(&s.config);
        s.breakpoint.observe(is_mobile);
        if let Some(snowfall) = s.snowfall.as_mut() {
            if let Err(err) = snowfall.rebuild(is_mobile) {
                tracing::warn!(%err, "snowfall rebuild failed");
            }
        }
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Remove `test_day` from the address bar without reloading.
fn strip_test_day_from_url() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(href) = window.location().href() else {
        return;
    };
    let Ok(url) = web_sys::Url::new(&href) else {
        return;
    };
    url.search_params().delete(TEST_DAY_PARAM);
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url.href()));
    }
}

/// Flag a locked cell briefly so the page can animate it.
fn shake(cell: &HtmlElement, duration_ms: u32) {
    let _ = cell.class_list().add_1("shake");
    let Some(window) = web_sys::window() else {
        return;
    };
    let target = cell.clone();
    let clear = Closure::once_into_js(move || {
        let _ = target.class_list().remove_1("shake");
    });
    let timeout = i32::try_from(duration_ms).unwrap_or(i32::MAX);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(clear.unchecked_ref(), timeout);
}
