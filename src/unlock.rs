//! Unlock state resolution.
//!
//! Decides which day the calendar is showing: the real local date, or a
//! December day forced through the `test_day` query parameter or the manual
//! test input. Malformed overrides are ignored, never reported.

use url::form_urlencoded;

use crate::types::{CalendarDate, DateSource, DateState, MAX_DAY, TOTAL_DAYS};

/// Query parameter carrying the test override.
pub const TEST_DAY_PARAM: &str = "test_day";

/// Source of "today".
pub trait Clock {
    fn today(&self) -> CalendarDate;
}

/// Local date from the browser (wasm32) or the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn today(&self) -> CalendarDate {
        let now = js_sys::Date::new_0();
        CalendarDate::new(now.get_month(), now.get_date())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn today(&self) -> CalendarDate {
        use chrono::Datelike;
        let now = chrono::Local::now();
        CalendarDate::new(now.month0(), now.day())
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}

/// A forced December day and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestOverride {
    pub day: u32,
    pub source: DateSource,
}

impl TestOverride {
    pub fn url(day: u32) -> Self {
        Self {
            day: day.min(MAX_DAY),
            source: DateSource::Url,
        }
    }

    pub fn manual(day: u32) -> Self {
        Self {
            day: day.min(MAX_DAY),
            source: DateSource::Manual,
        }
    }
}

/// Resolve the state to render: the override if present, the clock otherwise.
pub fn resolve_state(test_override: Option<TestOverride>, clock: &dyn Clock) -> DateState {
    match test_override {
        Some(forced) => DateState::overridden(forced.day, forced.source),
        None => DateState::real(clock.today()),
    }
}

/// Leading-integer parse: optional whitespace, optional sign, then digits.
///
/// Anything after the digits is ignored (`"12px"` is 12); no digits at all
/// yields `None`. Values saturate instead of overflowing.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..).unwrap_or("")),
        Some(b'+') => (false, trimmed.get(1..).unwrap_or("")),
        _ => (false, trimmed),
    };

    let digits: Vec<i64> = rest
        .chars()
        .map_while(|c| c.to_digit(10))
        .map(i64::from)
        .collect();
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .into_iter()
        .fold(0_i64, |acc, d| acc.saturating_mul(10).saturating_add(d));
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse a raw `test_day` value, clamped to `[0, MAX_DAY]`.
pub fn parse_test_day(raw: &str) -> Option<u32> {
    let value = parse_int_prefix(raw)?;
    u32::try_from(value.clamp(0, i64::from(MAX_DAY))).ok()
}

/// Read `test_day` from a URL query string (with or without the leading `?`).
///
/// Keys and values are form-urldecoded and only the first occurrence counts,
/// matching `URLSearchParams.get`. The page passes `location.search` here.
pub fn test_day_from_query(query: &str) -> Option<u32> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let (_, value) = form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == TEST_DAY_PARAM)?;
    parse_test_day(&value)
}

/// Clamp a day number handed over from JavaScript to `[0, MAX_DAY]`.
///
/// Fractions truncate toward zero; NaN and infinities are ignored.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn test_day_from_number(value: f64) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc().clamp(0.0, f64::from(MAX_DAY)) as u32)
}

/// Interpret the manual test input.
///
/// Unlike the query parameter, zero and negative values mean "no override".
pub fn manual_override(input: &str) -> Option<TestOverride> {
    let value = parse_int_prefix(input)?;
    if value <= 0 {
        return None;
    }
    let day = u32::try_from(value.min(i64::from(MAX_DAY))).ok()?;
    Some(TestOverride::manual(day))
}

/// What the daily gift button should do on a given real date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftOutcome {
    /// Not December: tell the user to come back later.
    OutOfSeason,
    /// December, but before day 1.
    NotStarted,
    /// Show the picture for this day.
    Day(u32),
    /// Past the last door: show the final picture.
    Final,
}

/// Decide the daily gift for `today`. Always uses the real date.
pub fn daily_gift(today: CalendarDate) -> GiftOutcome {
    if !today.is_december() {
        return GiftOutcome::OutOfSeason;
    }
    match today.day {
        0 => GiftOutcome::NotStarted,
        d if d <= TOTAL_DAYS => GiftOutcome::Day(d),
        _ => GiftOutcome::Final,
    }
}
