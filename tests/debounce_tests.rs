//! Debounce tests for advent
//!
//! Simulates the browser's timer loop against a fake clock to check that a
//! burst of resize events produces exactly one rebuild.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp, clippy::panic)]

use advent::debounce::{observe_resize, BreakpointWatcher, DebounceOutcome, Debouncer, ResizeArming};

/// Minimal stand-in for `setTimeout`: one pending deadline at a time.
struct FakeTimers {
    debouncer: Debouncer,
    deadline: Option<f64>,
    fired_at: Vec<f64>,
}

impl FakeTimers {
    fn new(delay_ms: u32) -> Self {
        Self {
            debouncer: Debouncer::new(delay_ms),
            deadline: None,
            fired_at: Vec::new(),
        }
    }

    fn resize(&mut self, now: f64) {
        if self.debouncer.notify(now) {
            self.arm(now);
        }
    }

    fn arm(&mut self, now: f64) {
        assert!(self.deadline.is_none(), "timer armed twice");
        self.deadline = Some(now + self.debouncer.delay_ms());
    }

    /// Run every timer due at or before `until`.
    fn advance(&mut self, until: f64) {
        while let Some(deadline) = self.deadline.filter(|d| *d <= until) {
            self.deadline = None;
            match self.debouncer.poll(deadline) {
                DebounceOutcome::Idle => {}
                DebounceOutcome::Wait(remaining) => self.deadline = Some(deadline + remaining),
                DebounceOutcome::Fire => self.fired_at.push(deadline),
            }
        }
    }
}

#[test]
fn test_burst_fires_once_after_quiet_window() {
    let mut timers = FakeTimers::new(200);
    for i in 0..20 {
        let now = f64::from(i) * 30.0;
        timers.advance(now);
        timers.resize(now);
    }
    // last event at 570ms
    timers.advance(10_000.0);
    assert_eq!(timers.fired_at, vec![770.0]);
    assert!(!timers.debouncer.is_pending());
}

#[test]
fn test_separate_bursts_fire_separately() {
    let mut timers = FakeTimers::new(200);
    timers.resize(0.0);
    timers.resize(50.0);
    timers.advance(1_000.0);
    timers.resize(1_000.0);
    timers.advance(5_000.0);
    assert_eq!(timers.fired_at, vec![250.0, 1_200.0]);
}

#[test]
fn test_single_event_fires_after_delay() {
    let mut timers = FakeTimers::new(200);
    timers.resize(100.0);
    timers.advance(299.0);
    assert!(timers.fired_at.is_empty());
    timers.advance(300.0);
    assert_eq!(timers.fired_at, vec![300.0]);
}

#[test]
fn test_cancel_suppresses_fire() {
    let mut timers = FakeTimers::new(200);
    timers.resize(0.0);
    timers.debouncer.cancel();
    timers.advance(1_000.0);
    assert!(timers.fired_at.is_empty());
    // the debouncer accepts a new burst afterwards
    assert!(timers.debouncer.notify(1_000.0));
}

#[test]
fn test_breakpoint_crossings() {
    let mut watcher = BreakpointWatcher::new(false);
    assert!(!watcher.observe(false));
    assert!(watcher.observe(true));
    assert!(!watcher.observe(true));
    assert!(watcher.observe(false));
    assert_eq!(watcher.is_mobile(), Some(false));

    let mut unseen = BreakpointWatcher::default();
    assert!(!unseen.observe(true));
    assert_eq!(unseen.is_mobile(), Some(true));
}

// ============================================================================
// Resize events feeding both debouncers
// ============================================================================

/// The resize wiring of the page: overlay timer, snowfall timer, breakpoint.
struct Page {
    breakpoint: BreakpointWatcher,
    overlay: FakeTimers,
    snowfall: FakeTimers,
    snowfall_running: bool,
}

impl Page {
    fn new(is_mobile: bool) -> Self {
        Self {
            breakpoint: BreakpointWatcher::new(is_mobile),
            overlay: FakeTimers::new(200),
            snowfall: FakeTimers::new(200),
            snowfall_running: true,
        }
    }

    fn resize(&mut self, now: f64, is_mobile: bool) -> ResizeArming {
        self.advance(now);
        let snowfall = self
            .snowfall_running
            .then_some(&mut self.snowfall.debouncer);
        let arming = observe_resize(
            now,
            is_mobile,
            &mut self.breakpoint,
            &mut self.overlay.debouncer,
            snowfall,
        );
        if arming.overlay {
            self.overlay.arm(now);
        }
        if arming.snowfall {
            self.snowfall.arm(now);
        }
        arming
    }

    fn advance(&mut self, until: f64) {
        self.overlay.advance(until);
        self.snowfall.advance(until);
    }
}

#[test]
fn test_resize_without_crossing_never_rebuilds_snow() {
    let mut page = Page::new(false);
    for i in 0..10 {
        let arming = page.resize(f64::from(i) * 30.0, false);
        assert!(!arming.crossed);
        assert!(!arming.snowfall);
    }
    page.advance(10_000.0);
    assert_eq!(page.overlay.fired_at, vec![470.0]);
    assert!(page.snowfall.fired_at.is_empty());
}

#[test]
fn test_back_and_forth_crossings_rebuild_once() {
    let mut page = Page::new(false);
    assert!(page.resize(0.0, true).snowfall);
    assert!(!page.resize(40.0, false).snowfall);
    assert!(!page.resize(80.0, true).snowfall);
    let last = page.resize(120.0, true);
    assert!(!last.crossed);
    page.advance(10_000.0);

    // last crossing at 80ms, last resize at 120ms
    assert_eq!(page.snowfall.fired_at, vec![280.0]);
    assert_eq!(page.overlay.fired_at, vec![320.0]);
}

#[test]
fn test_crossing_without_snowfall_only_renders_overlay() {
    let mut page = Page::new(true);
    page.snowfall_running = false;
    let arming = page.resize(0.0, false);
    assert_eq!(
        arming,
        ResizeArming {
            overlay: true,
            snowfall: false,
            crossed: true,
        }
    );
    page.advance(1_000.0);
    assert!(page.snowfall.fired_at.is_empty());
    assert_eq!(page.overlay.fired_at, vec![200.0]);
}
