//! Unlock resolution tests for advent
//!
//! Tests for the `test_day` query parameter, the manual test input, clock
//! fallback and the daily gift decision.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use advent::types::{CalendarDate, DateSource, DateState, DECEMBER, MAX_DAY, TOTAL_DAYS};
use advent::unlock::{
    daily_gift, manual_override, parse_int_prefix, parse_test_day, resolve_state,
    test_day_from_number, test_day_from_query, FixedClock, GiftOutcome, TestOverride,
};
use test_case::test_case;

fn march_clock() -> FixedClock {
    FixedClock(CalendarDate::new(2, 14))
}

// ============================================================================
// Query parameter
// ============================================================================

#[test_case("?test_day=10", Some(10) ; "plain value")]
#[test_case("test_day=10", Some(10) ; "without question mark")]
#[test_case("?foo=1&test_day=7&bar=2", Some(7) ; "among other params")]
#[test_case("?test_day=40", Some(31) ; "clamped high")]
#[test_case("?test_day=-5", Some(0) ; "clamped low")]
#[test_case("?test_day=12abc", Some(12) ; "leading integer")]
#[test_case("?test_day=abc", None ; "not a number")]
#[test_case("?test_day=", None ; "empty value")]
#[test_case("?test_day", None ; "no value")]
#[test_case("?test_day=3&test_day=9", Some(3) ; "first occurrence wins")]
#[test_case("?test_day=+4", Some(4) ; "plus decodes to space")]
#[test_case("", None ; "empty query")]
#[test_case("?other=5", None ; "param missing")]
#[test_case("?test_day=%31%30", Some(10) ; "percent encoded value")]
#[test_case("?test%5Fday=7", Some(7) ; "percent encoded key")]
#[test_case("?a=%26&test_day=2", Some(2) ; "encoded ampersand in other value")]
fn test_day_from_query_cases(query: &str, expected: Option<u32>) {
    assert_eq!(test_day_from_query(query), expected);
}

#[test]
fn test_every_query_day_is_within_range() {
    for raw in -100_i32..=100 {
        let query = format!("?test_day={raw}");
        let day = test_day_from_query(&query).unwrap();
        assert!(day <= MAX_DAY, "{query} gave {day}");
    }
}

#[test]
fn test_parse_int_prefix_saturates() {
    assert_eq!(parse_int_prefix("99999999999999999999999"), Some(i64::MAX));
    assert_eq!(parse_test_day("99999999999999999999999"), Some(MAX_DAY));
    assert_eq!(parse_int_prefix("  -3 days"), Some(-3));
    assert_eq!(parse_int_prefix("-"), None);
}

// ============================================================================
// Numbers from JavaScript
// ============================================================================

#[test_case(-1.0, Some(0) ; "negative clamps to zero")]
#[test_case(-40.0, Some(0) ; "large negative")]
#[test_case(0.0, Some(0) ; "zero")]
#[test_case(7.8, Some(7) ; "fraction truncates")]
#[test_case(31.0, Some(31) ; "upper bound")]
#[test_case(4_294_967_295.0, Some(31) ; "u32 max clamps high")]
#[test_case(f64::NAN, None ; "nan ignored")]
#[test_case(f64::NEG_INFINITY, None ; "infinity ignored")]
fn test_day_from_number_cases(value: f64, expected: Option<u32>) {
    assert_eq!(test_day_from_number(value), expected);
}

#[test]
fn test_negative_forced_day_locks_everything() {
    let forced = test_day_from_number(-1.0).map(TestOverride::url);
    let state = resolve_state(forced, &march_clock());
    assert_eq!(state.source(), DateSource::Url);
    assert_eq!(state.day(), 0);
    assert_eq!(state.unlocked_days(), 0);
    assert!((1..=TOTAL_DAYS).all(|d| !state.is_unlocked(d)));
}

// ============================================================================
// Resolution against the clock
// ============================================================================

#[test_case(0 ; "day zero")]
#[test_case(1 ; "first day")]
#[test_case(13 ; "mid month")]
#[test_case(25 ; "last door")]
#[test_case(26 ; "after last door")]
#[test_case(31 ; "new years eve")]
fn test_url_override_forces_december(day: u32) {
    let state = resolve_state(Some(TestOverride::url(day)), &march_clock());
    assert_eq!(state.month(), DECEMBER);
    assert_eq!(state.day(), day);
    assert_eq!(state.source(), DateSource::Url);
    assert_eq!(state.unlocked_days(), day);
}

#[test]
fn test_no_override_uses_clock() {
    let state = resolve_state(None, &march_clock());
    assert_eq!(state, DateState::real(CalendarDate::new(2, 14)));
    assert!(!state.is_december());
    assert_eq!(state.unlocked_days(), 0);
    assert!((1..=TOTAL_DAYS).all(|d| !state.is_unlocked(d)));
}

#[test]
fn test_december_clock_unlocks_through_today() {
    let clock = FixedClock(CalendarDate::new(DECEMBER, 5));
    let state = resolve_state(None, &clock);
    assert_eq!(state.source(), DateSource::Real);
    assert!(state.is_unlocked(1));
    assert!(state.is_unlocked(5));
    assert!(!state.is_unlocked(6));
    assert!(!state.is_unlocked(0));
}

// ============================================================================
// Manual test input
// ============================================================================

#[test_case("8", Some(8) ; "valid")]
#[test_case(" 8 ", Some(8) ; "whitespace")]
#[test_case("45", Some(31) ; "clamped")]
#[test_case("0", None ; "zero falls back")]
#[test_case("-2", None ; "negative falls back")]
#[test_case("", None ; "empty falls back")]
#[test_case("x", None ; "garbage falls back")]
fn test_manual_override_cases(input: &str, expected: Option<u32>) {
    let forced = manual_override(input);
    assert_eq!(forced.map(|o| o.day), expected);
    if let Some(forced) = forced {
        assert_eq!(forced.source, DateSource::Manual);
    }
}

#[test]
fn test_manual_fallback_prefers_url_then_clock() {
    let clock = march_clock();
    let url = test_day_from_query("?test_day=4").map(TestOverride::url);

    let state = resolve_state(manual_override("0").or(url), &clock);
    assert_eq!(state.day(), 4);
    assert_eq!(state.source(), DateSource::Url);

    let state = resolve_state(manual_override("0").or(None), &clock);
    assert_eq!(state.source(), DateSource::Real);
}

// ============================================================================
// Daily gift
// ============================================================================

#[test_case(CalendarDate::new(10, 30), GiftOutcome::OutOfSeason ; "november")]
#[test_case(CalendarDate::new(0, 1), GiftOutcome::OutOfSeason ; "january")]
#[test_case(CalendarDate::new(DECEMBER, 0), GiftOutcome::NotStarted ; "day zero")]
#[test_case(CalendarDate::new(DECEMBER, 1), GiftOutcome::Day(1) ; "first")]
#[test_case(CalendarDate::new(DECEMBER, 25), GiftOutcome::Day(25) ; "christmas")]
#[test_case(CalendarDate::new(DECEMBER, 26), GiftOutcome::Final ; "boxing day")]
fn test_daily_gift_cases(today: CalendarDate, expected: GiftOutcome) {
    assert_eq!(daily_gift(today), expected);
}
