//! Calendar date and unlock state types.

use serde::{Deserialize, Serialize};

/// Month index of December in the 0-indexed convention used by browsers.
pub const DECEMBER: u32 = 11;

/// Highest day a test override may request.
pub const MAX_DAY: u32 = 31;

/// Number of days with their own image in the calendar.
pub const TOTAL_DAYS: u32 = 25;

/// A plain local calendar date as read from a clock.
///
/// `month` is 0-indexed (0 = January, 11 = December), `day` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    pub fn is_december(&self) -> bool {
        self.month == DECEMBER
    }
}

/// Where the current "today" came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateSource {
    /// The system clock.
    Real,
    /// The `test_day` query parameter.
    Url,
    /// The manual test input on the page.
    Manual,
}

/// The date the calendar is rendered for.
///
/// `day` is always within `[0, MAX_DAY]`; the constructor clamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateState {
    month: u32,
    day: u32,
    source: DateSource,
}

impl DateState {
    pub fn new(month: u32, day: u32, source: DateSource) -> Self {
        Self {
            month,
            day: day.min(MAX_DAY),
            source,
        }
    }

    /// State taken straight from a clock reading.
    pub fn real(today: CalendarDate) -> Self {
        Self::new(today.month, today.day, DateSource::Real)
    }

    /// State forced to December `day` by a test override.
    pub fn overridden(day: u32, source: DateSource) -> Self {
        Self::new(DECEMBER, day, source)
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn source(&self) -> DateSource {
        self.source
    }

    pub fn is_december(&self) -> bool {
        self.month == DECEMBER
    }

    /// Number of unlocked days: the day of month in December, zero otherwise.
    ///
    /// May exceed [`TOTAL_DAYS`] late in December; callers that index cells
    /// compare against it rather than iterate it.
    pub fn unlocked_days(&self) -> u32 {
        if self.is_december() {
            self.day
        } else {
            0
        }
    }

    /// Whether the cell for `day` is revealed in this state.
    pub fn is_unlocked(&self, day: u32) -> bool {
        day >= 1 && day <= self.unlocked_days()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_day_is_clamped() {
        let state = DateState::new(DECEMBER, 99, DateSource::Manual);
        assert_eq!(state.day(), MAX_DAY);
    }

    #[test]
    fn test_unlocked_days_outside_december() {
        let state = DateState::real(CalendarDate::new(10, 30));
        assert_eq!(state.unlocked_days(), 0);
        assert!(!state.is_unlocked(1));
    }

    #[test]
    fn test_day_zero_unlocks_nothing() {
        let state = DateState::overridden(0, DateSource::Url);
        assert!(!state.is_unlocked(0));
        assert!(!state.is_unlocked(1));
    }

    #[test]
    fn test_source_serializes_lowercase() {
        let json = serde_json::to_string(&DateSource::Manual).unwrap();
        assert_eq!(json, "\"manual\"");
    }
}
