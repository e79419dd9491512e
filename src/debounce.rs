//! Trailing-edge debouncing for resize-driven rebuilds.
//!
//! The browser layer owns the actual `setTimeout`; these types only decide
//! when a timer must be armed and whether it should fire or be re-armed.
//! Times are milliseconds from any monotonic origin (`performance.now()`).

/// Result of polling a [`Debouncer`] from its timer callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebounceOutcome {
    /// Nothing pending.
    Idle,
    /// Activity happened recently; check again after this many ms.
    Wait(f64),
    /// The quiet window elapsed: run the debounced action now.
    Fire,
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: f64,
    last_activity_ms: Option<f64>,
    armed: bool,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms: f64::from(delay_ms),
            last_activity_ms: None,
            armed: false,
        }
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    pub fn is_pending(&self) -> bool {
        self.last_activity_ms.is_some()
    }

    /// Record activity. Returns true when the caller must arm a timer.
    pub fn notify(&mut self, now_ms: f64) -> bool {
        self.last_activity_ms = Some(now_ms);
        if self.armed {
            false
        } else {
            self.armed = true;
            true
        }
    }

    /// Called when the timer fires.
    pub fn poll(&mut self, now_ms: f64) -> DebounceOutcome {
        let Some(last) = self.last_activity_ms else {
            self.armed = false;
            return DebounceOutcome::Idle;
        };
        let elapsed = (now_ms - last).max(0.0);
        if elapsed < self.delay_ms {
            return DebounceOutcome::Wait(self.delay_ms - elapsed);
        }
        self.last_activity_ms = None;
        self.armed = false;
        DebounceOutcome::Fire
    }

    /// Drop any pending activity (the caller clears its timer).
    pub fn cancel(&mut self) {
        self.last_activity_ms = None;
        self.armed = false;
    }
}

/// Tracks which side of the mobile breakpoint the window is on.
#[derive(Debug, Clone, Default)]
pub struct BreakpointWatcher {
    last_is_mobile: Option<bool>,
}

impl BreakpointWatcher {
    pub fn new(initial_is_mobile: bool) -> Self {
        Self {
            last_is_mobile: Some(initial_is_mobile),
        }
    }

    /// Record the current mode; true only when it differs from the last one.
    pub fn observe(&mut self, is_mobile: bool) -> bool {
        match self.last_is_mobile.replace(is_mobile) {
            Some(previous) => previous != is_mobile,
            None => false,
        }
    }

    pub fn is_mobile(&self) -> Option<bool> {
        self.last_is_mobile
    }
}

/// Timers one resize event asks the browser layer to arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeArming {
    /// The overlay debouncer needs a timer.
    pub overlay: bool,
    /// The snowfall debouncer needs a timer.
    pub snowfall: bool,
    /// This event crossed the mobile breakpoint.
    pub crossed: bool,
}

/// Feed one resize event to the overlay and snowfall debouncers.
///
/// Every event notifies the overlay debouncer. Only breakpoint crossings
/// notify the snowfall one, and only while snowfall is running (`Some`).
pub fn observe_resize(
    now_ms: f64,
    is_mobile: bool,
    breakpoint: &mut BreakpointWatcher,
    overlay: &mut Debouncer,
    snowfall: Option<&mut Debouncer>,
) -> ResizeArming {
    let overlay = overlay.notify(now_ms);
    let crossed = breakpoint.observe(is_mobile);
    let snowfall = crossed && snowfall.is_some_and(|debouncer| debouncer.notify(now_ms));
    ResizeArming {
        overlay,
        snowfall,
        crossed,
    }
}
