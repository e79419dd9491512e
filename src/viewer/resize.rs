//! Resize handling for `AdventCalendar`.
//!
//! A burst of `resize` events arms at most one timer per task. When the
//! timer fires it asks the [`Debouncer`] whether the window has been quiet
//! long enough, and either runs the task or re-arms for the remainder.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::{matches_mobile, now_ms, AdventCalendar, SharedState};
use crate::debounce::{observe_resize, DebounceOutcome, Debouncer};

/// Work deferred until resizing settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResizeTask {
    /// Re-measure and re-render the overlay.
    Overlay,
    /// Rebuild the snowfall for the new breakpoint side.
    Snowfall,
}

/// A debouncer plus the browser timer currently serving it.
pub(crate) struct DebouncedTimer {
    pub(crate) debouncer: Debouncer,
    handle: Option<i32>,
    closure: Option<Closure<dyn FnMut()>>,
}

impl DebouncedTimer {
    pub(crate) fn new(debouncer: Debouncer) -> Self {
        Self {
            debouncer,
            handle: None,
            closure: None,
        }
    }
}

impl SharedState {
    fn timer_mut(&mut self, task: ResizeTask) -> &mut DebouncedTimer {
        match task {
            ResizeTask::Overlay => &mut self.overlay_timer,
            ResizeTask::Snowfall => &mut self.snow_timer,
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn timeout_ms(ms: f64) -> i32 {
    ms.ceil().clamp(0.0, f64::from(i32::MAX)) as i32
}

impl AdventCalendar {
    pub(crate) fn internal_resize(state: &Rc<RefCell<SharedState>>) {
        let now = now_ms();
        let (arm_overlay, arm_snowfall) = {
            let mut guard = state.borrow_mut();
            let s = &mut *guard;
            let is_mobile = matches_mobile(&s.config);
            let snowfall = s.snowfall.is_some().then_some(&mut s.snow_timer.debouncer);
            let arming = observe_resize(
                now,
                is_mobile,
                &mut s.breakpoint,
                &mut s.overlay_timer.debouncer,
                snowfall,
            );
            if arming.crossed {
                tracing::debug!(is_mobile, "crossed mobile breakpoint");
            }
            (
                arming.overlay.then(|| s.overlay_timer.debouncer.delay_ms()),
                arming.snowfall.then(|| s.snow_timer.debouncer.delay_ms()),
            )
        };

        if let Some(delay) = arm_overlay {
            Self::schedule_resize_task(state, ResizeTask::Overlay, delay);
        }
        if let Some(delay) = arm_snowfall {
            Self::schedule_resize_task(state, ResizeTask::Snowfall, delay);
        }
    }

    pub(crate) fn schedule_resize_task(
        state: &Rc<RefCell<SharedState>>,
        task: ResizeTask,
        delay_ms: f64,
    ) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        let timer = s.timer_mut(task);
        // Cancel any existing timer
        if let Some(handle) = timer.handle.take() {
            window.clear_timeout_with_handle(handle);
        }
        if timer.closure.is_none() {
            let weak_state = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    AdventCalendar::handle_resize_timer(&state, task);
                }
            }) as Box<dyn FnMut()>);
            timer.closure = Some(closure);
        }
        let Some(callback) = timer.closure.as_ref() else {
            return;
        };
        timer.handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                timeout_ms(delay_ms),
            )
            .ok();
        if timer.handle.is_none() {
            timer.debouncer.cancel();
        }
    }

    pub(crate) fn handle_resize_timer(state: &Rc<RefCell<SharedState>>, task: ResizeTask) {
        let outcome = {
            let mut s = state.borrow_mut();
            let timer = s.timer_mut(task);
            timer.handle = None;
            timer.debouncer.poll(now_ms())
        };
        match outcome {
            DebounceOutcome::Idle => {}
            // Still resizing, reschedule
            DebounceOutcome::Wait(remaining) => Self::schedule_resize_task(state, task, remaining),
            DebounceOutcome::Fire => match task {
                ResizeTask::Overlay => Self::render_state(state),
                ResizeTask::Snowfall => Self::internal_rebuild_snowfall(state),
            },
        }
    }
}
