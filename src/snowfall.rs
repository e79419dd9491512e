//! Snowfall decoration parameters.
//!
//! A [`FlakeGenerator`] is an endless iterator of randomized flake settings.
//! The DOM layer pulls one set per flake at build time and another whenever
//! a flake finishes its fall, so the snow never visibly restarts.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AdventError, Result};

/// Inclusive-exclusive numeric range sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn check(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(AdventError::Config(format!(
                "snowfall.{name}: invalid range {}..{}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

/// Settings that differ between phone-sized and desktop screens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlakeProfile {
    pub count: u32,
    pub size_px: Span,
    pub fall_duration_s: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnowfallConfig {
    pub enabled: bool,
    /// Screens at most this wide use the mobile profile.
    pub mobile_breakpoint_px: u32,
    /// Delay before rebuilding after crossing the breakpoint.
    pub rebuild_debounce_ms: u32,
    /// Name of the CSS keyframes whose end recycles a flake.
    pub animation_name: String,
    pub glyphs: Vec<char>,
    pub desktop: FlakeProfile,
    pub mobile: FlakeProfile,
    pub fall_delay_s: Span,
    pub drift_duration_s: Span,
    pub drift_delay_s: Span,
    pub opacity: Span,
    /// Probability of the slow vertical variant (otherwise drifting).
    pub low_probability: f64,
    /// Probability of additionally fading out.
    pub fade_probability: f64,
}

impl Default for SnowfallConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mobile_breakpoint_px: 600,
            rebuild_debounce_ms: 200,
            animation_name: "snowFall".to_string(),
            glyphs: vec!['❅', '❆'],
            desktop: FlakeProfile {
                count: 28,
                size_px: Span::new(16.0, 28.0),
                fall_duration_s: Span::new(8.0, 24.0),
            },
            mobile: FlakeProfile {
                count: 12,
                size_px: Span::new(12.0, 18.0),
                fall_duration_s: Span::new(6.0, 12.0),
            },
            fall_delay_s: Span::new(-8.0, 0.0),
            drift_duration_s: Span::new(4.0, 10.0),
            drift_delay_s: Span::new(0.0, 3.0),
            opacity: Span::new(0.6, 0.98),
            low_probability: 0.36,
            fade_probability: 0.18,
        }
    }
}

impl SnowfallConfig {
    pub fn validate(&self) -> Result<()> {
        self.desktop.size_px.check("desktop.sizePx")?;
        self.desktop.fall_duration_s.check("desktop.fallDurationS")?;
        self.mobile.size_px.check("mobile.sizePx")?;
        self.mobile.fall_duration_s.check("mobile.fallDurationS")?;
        self.fall_delay_s.check("fallDelayS")?;
        self.drift_duration_s.check("driftDurationS")?;
        self.drift_delay_s.check("driftDelayS")?;
        self.opacity.check("opacity")?;
        for (name, p) in [
            ("lowProbability", self.low_probability),
            ("fadeProbability", self.fade_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(AdventError::Config(format!(
                    "snowfall.{name} must be within 0..=1 (got {p})"
                )));
            }
        }
        if self.glyphs.is_empty() {
            return Err(AdventError::Config(
                "snowfall.glyphs must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// CSS media query matching the mobile profile.
    pub fn mobile_query(&self) -> String {
        format!("(max-width: {}px)", self.mobile_breakpoint_px)
    }

    pub fn profile(&self, is_mobile: bool) -> &FlakeProfile {
        if is_mobile {
            &self.mobile
        } else {
            &self.desktop
        }
    }

    pub fn flake_count(&self, is_mobile: bool) -> u32 {
        self.profile(is_mobile).count
    }
}

/// Motion style of a flake, mapped to a CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlakeVariant {
    Low,
    Drift,
}

impl FlakeVariant {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Low => "s-low",
            Self::Drift => "s-drift",
        }
    }
}

/// One flake's randomized settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlakeParams {
    pub glyph: char,
    /// Font size in whole pixels.
    pub size_px: f64,
    pub left_percent: f64,
    pub fall_duration_s: f64,
    pub fall_delay_s: f64,
    pub drift_duration_s: f64,
    pub drift_delay_s: f64,
    pub variant: FlakeVariant,
    pub fade: bool,
    /// Opacity rounded to two decimals.
    pub opacity: f64,
    /// Initial rotation in whole degrees, 0..360.
    pub rotation_deg: f64,
}

impl FlakeParams {
    /// CSS classes for the flake element, base class first.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["snowflake", self.variant.class_name()];
        if self.fade {
            classes.push("s-fade");
        }
        classes
    }

    /// CSS custom properties driving the fall and drift animations.
    pub fn css_variables(&self) -> [(&'static str, String); 5] {
        [
            ("--flake-size", format!("{:.0}px", self.size_px)),
            ("--fall-dur", format!("{:.3}s", self.fall_duration_s)),
            ("--fall-delay", format!("{:.3}s", self.fall_delay_s)),
            ("--drift-dur", format!("{:.3}s", self.drift_duration_s)),
            ("--drift-delay", format!("{:.3}s", self.drift_delay_s)),
        ]
    }

    pub fn transform(&self) -> String {
        format!("translateY(-10vh) rotate({:.0}deg)", self.rotation_deg)
    }
}

/// Endless source of flake parameters.
pub struct FlakeGenerator<R> {
    rng: R,
    config: SnowfallConfig,
    is_mobile: bool,
}

impl<R: Rng> FlakeGenerator<R> {
    pub fn new(rng: R, config: SnowfallConfig, is_mobile: bool) -> Self {
        Self {
            rng,
            config,
            is_mobile,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.is_mobile
    }

    /// Switch profile; later flakes use the new size and speed ranges.
    pub fn set_mobile(&mut self, is_mobile: bool) {
        self.is_mobile = is_mobile;
    }

    pub fn config(&self) -> &SnowfallConfig {
        &self.config
    }

    /// Number of flakes to keep on screen for the current profile.
    pub fn target_count(&self) -> u32 {
        self.config.flake_count(self.is_mobile)
    }

    pub fn next_flake(&mut self) -> FlakeParams {
        let profile = *self.config.profile(self.is_mobile);
        let rng = &mut self.rng;

        let glyph = self.config.glyphs.choose(rng).copied().unwrap_or('❅');
        let size_px = profile.size_px.sample(rng).round();
        let left_percent = Span::new(0.0, 100.0).sample(rng);
        let fall_duration_s = profile.fall_duration_s.sample(rng);
        let fall_delay_s = self.config.fall_delay_s.sample(rng);
        let drift_duration_s = self.config.drift_duration_s.sample(rng);
        let drift_delay_s = self.config.drift_delay_s.sample(rng);

        let variant = if rng.gen_bool(self.config.low_probability.clamp(0.0, 1.0)) {
            FlakeVariant::Low
        } else {
            FlakeVariant::Drift
        };
        let fade = rng.gen_bool(self.config.fade_probability.clamp(0.0, 1.0));
        let opacity = (self.config.opacity.sample(rng) * 100.0).round() / 100.0;
        let rotation_deg = Span::new(0.0, 360.0).sample(rng).floor();

        FlakeParams {
            glyph,
            size_px,
            left_percent,
            fall_duration_s,
            fall_delay_s,
            drift_duration_s,
            drift_delay_s,
            variant,
            fade,
            opacity,
            rotation_deg,
        }
    }
}

impl<R: Rng> Iterator for FlakeGenerator<R> {
    type Item = FlakeParams;

    fn next(&mut self) -> Option<FlakeParams> {
        Some(self.next_flake())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator(is_mobile: bool) -> FlakeGenerator<StdRng> {
        FlakeGenerator::new(StdRng::seed_from_u64(7), SnowfallConfig::default(), is_mobile)
    }

    #[test]
    fn test_desktop_flakes_stay_in_bounds() {
        for flake in generator(false).take(500) {
            assert!((16.0..=28.0).contains(&flake.size_px));
            assert_eq!(flake.size_px, flake.size_px.round());
            assert!((0.0..100.0).contains(&flake.left_percent));
            assert!((8.0..24.0).contains(&flake.fall_duration_s));
            assert!((-8.0..0.0).contains(&flake.fall_delay_s));
            assert!((4.0..10.0).contains(&flake.drift_duration_s));
            assert!((0.0..3.0).contains(&flake.drift_delay_s));
            assert!((0.6..=0.98).contains(&flake.opacity));
            assert!((0.0..360.0).contains(&flake.rotation_deg));
            assert!(flake.glyph == '❅' || flake.glyph == '❆');
        }
    }

    #[test]
    fn test_mobile_profile_is_smaller() {
        let mut gen = generator(true);
        assert_eq!(gen.target_count(), 12);
        for flake in gen.by_ref().take(200) {
            assert!((12.0..=18.0).contains(&flake.size_px));
            assert!((6.0..12.0).contains(&flake.fall_duration_s));
        }
        gen.set_mobile(false);
        assert_eq!(gen.target_count(), 28);
    }

    #[test]
    fn test_generator_never_ends() {
        assert_eq!(generator(false).take(10_000).count(), 10_000);
    }

    #[test]
    fn test_variants_mix() {
        let flakes: Vec<_> = generator(false).take(1_000).collect();
        let low = flakes.iter().filter(|f| f.variant == FlakeVariant::Low).count();
        let fade = flakes.iter().filter(|f| f.fade).count();
        assert!(low > 200 && low < 500, "low variant count {low}");
        assert!(fade > 80 && fade < 300, "fade count {fade}");
    }

    #[test]
    fn test_classes_and_css() {
        let mut flake = generator(false).next_flake();
        flake.variant = FlakeVariant::Drift;
        flake.fade = true;
        flake.size_px = 20.0;
        assert_eq!(flake.classes(), vec!["snowflake", "s-drift", "s-fade"]);
        assert_eq!(flake.css_variables()[0].1, "20px");
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let mut config = SnowfallConfig::default();
        config.opacity = Span::new(1.0, 0.5);
        assert!(config.validate().is_err());

        let mut config = SnowfallConfig::default();
        config.fade_probability = 1.5;
        assert!(config.validate().is_err());

        let mut config = SnowfallConfig::default();
        config.glyphs.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mobile_query() {
        assert_eq!(SnowfallConfig::default().mobile_query(), "(max-width: 600px)");
    }
}
