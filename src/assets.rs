//! Image asset naming and fallback candidates.
//!
//! Every image is addressed by a key (`cal3`, `day3`, `calf`) and resolved
//! against the configured folder and extension list. Loaders try the
//! candidates in order and give up with a warning after the last one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AdventError, Result};
use crate::types::{DateState, TOTAL_DAYS};

/// Logical image names used by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKey {
    /// Background calendar image showing `n` opened doors (`cal{n}`).
    Calendar(u32),
    /// Picture revealed behind door `n` (`day{n}`).
    Day(u32),
    /// Picture shown once the calendar is complete (`calf`).
    Final,
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calendar(n) => write!(f, "cal{n}"),
            Self::Day(n) => write!(f, "day{n}"),
            Self::Final => f.write_str("calf"),
        }
    }
}

/// Background image for a given state.
///
/// `cal0` before December or on day 0, `cal{day}` through day 25, then `calf`.
pub fn background_key(state: &DateState) -> ImageKey {
    let unlocked = state.unlocked_days();
    if unlocked > TOTAL_DAYS {
        ImageKey::Final
    } else {
        ImageKey::Calendar(unlocked)
    }
}

/// Image revealed for a calendar day. Day 0 has no image.
pub fn day_image_key(day: u32) -> Option<ImageKey> {
    match day {
        0 => None,
        d if d <= TOTAL_DAYS => Some(ImageKey::Day(d)),
        _ => Some(ImageKey::Final),
    }
}

/// Where images live and which extensions to try.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Folder prefix, relative to the page.
    pub folder: String,
    /// Extensions tried in order.
    pub extensions: Vec<String>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            folder: "res".to_string(),
            extensions: vec!["png".to_string(), "jpg".to_string()],
        }
    }
}

impl AssetConfig {
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(AdventError::Config(
                "assets.extensions must list at least one extension".to_string(),
            ));
        }
        if self.extensions.iter().any(|ext| ext.trim().is_empty()) {
            return Err(AdventError::Config(
                "assets.extensions must not contain empty entries".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve a key to its ordered list of candidate URLs.
    pub fn source(&self, key: ImageKey) -> ImageSource {
        let folder = self.folder.trim_end_matches('/');
        let candidates = self
            .extensions
            .iter()
            .map(|ext| {
                let ext = ext.trim_start_matches('.');
                if folder.is_empty() {
                    format!("{key}.{ext}")
                } else {
                    format!("{folder}/{key}.{ext}")
                }
            })
            .collect();
        ImageSource {
            key: key.to_string(),
            candidates,
        }
    }
}

/// An image and the URLs to try for it, most preferred first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSource {
    pub key: String,
    pub candidates: Vec<String>,
}

impl ImageSource {
    pub fn primary(&self) -> Option<&str> {
        self.candidates.first().map(String::as_str)
    }

    /// Candidate to try after `index` failed, if any.
    pub fn fallback_after(&self, index: usize) -> Option<&str> {
        self.candidates
            .get(index.saturating_add(1))
            .map(String::as_str)
    }

    /// Human-readable list of every candidate, for warnings.
    pub fn describe(&self) -> String {
        self.candidates.join(" / ")
    }
}
