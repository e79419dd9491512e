//! Calendar configuration.
//!
//! Every field has a default, so hosts only pass what they want to change.
//! The browser hands a plain JS object to `AdventCalendar.withConfig`, the
//! CLI reads the same shape from a JSON file.

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::assets::AssetConfig;
use crate::error::{AdventError, Result};
use crate::layout::GridGeometry;
use crate::snowfall::SnowfallConfig;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarConfig {
    pub grid: GridGeometry,
    pub assets: AssetConfig,
    pub snowfall: SnowfallConfig,
    pub labels: LabelConfig,
    pub elements: ElementIds,
    pub overlay: OverlayConfig,
    /// Minimum level written to the console (`error`..`trace`, or `off`).
    pub log_level: Option<String>,
}

impl CalendarConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.assets.validate()?;
        self.snowfall.validate()?;
        if let Some(level) = &self.log_level {
            parse_level(level)?;
        }
        Ok(())
    }

    /// Configured log level, `INFO` when unset.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|level| parse_level(level).ok())
            .unwrap_or(LevelFilter::INFO)
    }
}

fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| AdventError::Config(format!("unknown log level '{level}'")))
}

/// Overlay behaviour not covered by the grid geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    /// Delay before re-rendering after the last resize event.
    pub resize_debounce_ms: u32,
    /// How long the `shake` class stays on a locked cell after a click.
    pub locked_shake_ms: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 200,
            locked_shake_ms: 450,
        }
    }
}

/// User-facing strings. `{day}` is replaced with the day number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelConfig {
    pub day_caption: String,
    pub final_caption: String,
    pub unlocked_cell: String,
    pub locked_cell: String,
    pub gift_out_of_season: String,
    pub gift_not_started: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            day_caption: "Day {day}".to_string(),
            final_caption: "Calendar complete 🎄".to_string(),
            unlocked_cell: "Open day {day}".to_string(),
            locked_cell: "Day {day} (locked)".to_string(),
            gift_out_of_season: "🎅 The daily gift is only available during December!"
                .to_string(),
            gift_not_started: "The calendar hasn't started yet!".to_string(),
        }
    }
}

impl LabelConfig {
    /// Substitute `{day}` in a label template.
    pub fn format_day(template: &str, day: u32) -> String {
        template.replace("{day}", &day.to_string())
    }

    pub fn day_caption(&self, day: u32) -> String {
        Self::format_day(&self.day_caption, day)
    }

    pub fn cell_label(&self, day: u32, unlocked: bool) -> String {
        let template = if unlocked {
            &self.unlocked_cell
        } else {
            &self.locked_cell
        };
        Self::format_day(template, day)
    }
}

/// Ids of the page elements the calendar looks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub calendar_image: String,
    pub overlay: String,
    pub modal: String,
    pub modal_image: String,
    pub modal_caption: String,
    pub modal_close: String,
    pub test_input: String,
    pub gift_button: String,
    pub snowfall: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            calendar_image: "calendarImage".to_string(),
            overlay: "calendarOverlay".to_string(),
            modal: "imageModal".to_string(),
            modal_image: "modalImg".to_string(),
            modal_caption: "modalCaption".to_string(),
            modal_close: "closeModal".to_string(),
            test_input: "testDay".to_string(),
            gift_button: "dailyGiftButton".to_string(),
            snowfall: "snowfall".to_string(),
        }
    }
}
