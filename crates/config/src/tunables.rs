//! Live-tunable drawing parameters

use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_MAX_CATCH_UP_FRAMES, DEFAULT_REFRESH_RATE, DEFAULT_SAMPLING_DISTANCE,
    DEFAULT_SMOOTHING, UNLIMITED_SAMPLING_RATE,
};

/// Errors produced while reading configuration from the environment
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// How stroke paths are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    /// Cubic Bezier segments through every sample
    #[default]
    Bezier,
    /// Straight polyline through every sample
    Linear,
}

/// A single live parameter change, as sent by UI controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "param", content = "value")]
pub enum TunableUpdate {
    Smoothing(f64),
    /// 1000 (the slider maximum) means unlimited
    SamplingRateLimit(u32),
    SamplingDistance { enabled: bool, threshold: f64 },
    RefreshRateLimit { enabled: bool, limit: u32 },
    StrokeStyle(StrokeStyle),
    ShowSampleCircles(bool),
    ShowDebugOverlay(bool),
}

/// Tunable parameters for sampling, smoothing and rendering
///
/// The setters clamp their inputs. Fields are public, so the period
/// accessors also treat a zero rate as 1/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tunables {
    /// Smoothing coefficient K
    pub smoothing: f64,
    pub limit_sampling_rate: bool,
    /// Accepted samples per second when the rate gate is on
    pub sampling_rate_limit: u32,
    pub limit_sampling_distance: bool,
    /// Minimum distance from the last accepted point
    pub sampling_distance_threshold: f64,
    pub limit_refresh_rate: bool,
    /// Frames per second when the refresh gate is on
    pub refresh_rate_limit: u32,
    /// Maximum frames the render schedule may fall behind before resyncing
    pub max_catch_up_frames: u32,
    pub stroke_style: StrokeStyle,
    pub show_sample_circles: bool,
    pub show_debug_overlay: bool,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            limit_sampling_rate: false,
            sampling_rate_limit: UNLIMITED_SAMPLING_RATE,
            limit_sampling_distance: false,
            sampling_distance_threshold: DEFAULT_SAMPLING_DISTANCE,
            limit_refresh_rate: true,
            refresh_rate_limit: DEFAULT_REFRESH_RATE,
            max_catch_up_frames: DEFAULT_MAX_CATCH_UP_FRAMES,
            stroke_style: StrokeStyle::Bezier,
            show_sample_circles: true,
            show_debug_overlay: true,
        }
    }
}

impl Tunables {
    /// Minimum time between accepted samples in milliseconds
    pub fn sampling_period_ms(&self) -> f64 {
        1000.0 / self.sampling_rate_limit.max(1) as f64
    }

    /// Time between rendered frames in milliseconds
    pub fn refresh_period_ms(&self) -> f64 {
        1000.0 / self.refresh_rate_limit.max(1) as f64
    }

    /// Set K, clamped to [0, 1]
    pub fn set_smoothing(&mut self, k: f64) {
        self.smoothing = if k.is_finite() { k.clamp(0.0, 1.0) } else { DEFAULT_SMOOTHING };
    }

    /// Set the sampling rate limit, clamped to [1, 1000].
    ///
    /// The gate is enabled for every value except the unlimited sentinel.
    pub fn set_sampling_rate_limit(&mut self, limit: u32) {
        self.sampling_rate_limit = limit.clamp(1, UNLIMITED_SAMPLING_RATE);
        self.limit_sampling_rate = self.sampling_rate_limit != UNLIMITED_SAMPLING_RATE;
    }

    pub fn set_sampling_distance(&mut self, enabled: bool, threshold: f64) {
        self.limit_sampling_distance = enabled;
        if threshold.is_finite() {
            self.sampling_distance_threshold = threshold.max(0.0);
        }
    }

    /// Set the refresh rate limit, clamped to [1, 1000]
    pub fn set_refresh_rate_limit(&mut self, enabled: bool, limit: u32) {
        self.limit_refresh_rate = enabled;
        self.refresh_rate_limit = limit.clamp(1, 1000);
    }

    /// Apply a UI-originated update
    pub fn apply(&mut self, update: TunableUpdate) {
        match update {
            TunableUpdate::Smoothing(k) => self.set_smoothing(k),
            TunableUpdate::SamplingRateLimit(limit) => self.set_sampling_rate_limit(limit),
            TunableUpdate::SamplingDistance { enabled, threshold } => {
                self.set_sampling_distance(enabled, threshold)
            }
            TunableUpdate::RefreshRateLimit { enabled, limit } => {
                self.set_refresh_rate_limit(enabled, limit)
            }
            TunableUpdate::StrokeStyle(style) => self.stroke_style = style,
            TunableUpdate::ShowSampleCircles(show) => self.show_sample_circles = show,
            TunableUpdate::ShowDebugOverlay(show) => self.show_debug_overlay = show,
        }
    }

    /// Read overrides from `SKETCHPAD_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through an arbitrary key lookup.
    ///
    /// `SKETCHPAD_SAMPLING_DISTANCE` and `SKETCHPAD_REFRESH_RATE` accept `off`
    /// to disable their gate.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut tunables = Self::default();

        if let Some(value) = lookup("SKETCHPAD_SMOOTHING") {
            tunables.set_smoothing(parse(&value, "SKETCHPAD_SMOOTHING")?);
        }

        if let Some(value) = lookup("SKETCHPAD_SAMPLING_RATE") {
            tunables.set_sampling_rate_limit(parse(&value, "SKETCHPAD_SAMPLING_RATE")?);
        }

        if let Some(value) = lookup("SKETCHPAD_SAMPLING_DISTANCE") {
            match value.trim() {
                "off" => tunables.limit_sampling_distance = false,
                other => {
                    let threshold = parse(other, "SKETCHPAD_SAMPLING_DISTANCE")?;
                    tunables.set_sampling_distance(true, threshold);
                }
            }
        }

        if let Some(value) = lookup("SKETCHPAD_REFRESH_RATE") {
            match value.trim() {
                "off" => tunables.limit_refresh_rate = false,
                other => {
                    let limit = parse(other, "SKETCHPAD_REFRESH_RATE")?;
                    tunables.set_refresh_rate_limit(true, limit);
                }
            }
        }

        if let Some(value) = lookup("SKETCHPAD_STROKE_STYLE") {
            tunables.stroke_style = match value.trim() {
                "bezier" => StrokeStyle::Bezier,
                "linear" => StrokeStyle::Linear,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "SKETCHPAD_STROKE_STYLE",
                        value,
                    })
                }
            };
        }

        Ok(tunables)
    }
}

fn parse<T: std::str::FromStr>(value: &str, key: &'static str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let tunables = Tunables::default();
        assert_eq!(tunables.smoothing, 0.35);
        assert!(!tunables.limit_sampling_rate);
        assert_eq!(tunables.sampling_rate_limit, 1000);
        assert!(!tunables.limit_sampling_distance);
        assert_eq!(tunables.sampling_distance_threshold, 10.0);
        assert!(tunables.limit_refresh_rate);
        assert_eq!(tunables.refresh_rate_limit, 60);
        assert!((tunables.refresh_period_ms() - 1000.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_sampling_rate_sentinel() {
        let mut tunables = Tunables::default();

        tunables.set_sampling_rate_limit(100);
        assert!(tunables.limit_sampling_rate);
        assert!((tunables.sampling_period_ms() - 10.0).abs() < 1e-9);

        tunables.set_sampling_rate_limit(1000);
        assert!(!tunables.limit_sampling_rate);

        // Zero would divide by zero downstream
        tunables.set_sampling_rate_limit(0);
        assert_eq!(tunables.sampling_rate_limit, 1);
    }

    #[test]
    fn test_apply_updates() {
        let mut tunables = Tunables::default();
        tunables.apply(TunableUpdate::Smoothing(2.5));
        assert_eq!(tunables.smoothing, 1.0);

        tunables.apply(TunableUpdate::SamplingDistance {
            enabled: true,
            threshold: -3.0,
        });
        assert!(tunables.limit_sampling_distance);
        assert_eq!(tunables.sampling_distance_threshold, 0.0);

        tunables.apply(TunableUpdate::RefreshRateLimit {
            enabled: false,
            limit: 30,
        });
        assert!(!tunables.limit_refresh_rate);
        assert_eq!(tunables.refresh_rate_limit, 30);

        tunables.apply(TunableUpdate::StrokeStyle(StrokeStyle::Linear));
        assert_eq!(tunables.stroke_style, StrokeStyle::Linear);
    }

    #[test]
    fn test_from_lookup() {
        let tunables = Tunables::from_lookup(lookup(&[
            ("SKETCHPAD_SMOOTHING", "0.5"),
            ("SKETCHPAD_SAMPLING_RATE", "120"),
            ("SKETCHPAD_SAMPLING_DISTANCE", "4"),
            ("SKETCHPAD_REFRESH_RATE", "off"),
            ("SKETCHPAD_STROKE_STYLE", "linear"),
        ]))
        .unwrap();

        assert_eq!(tunables.smoothing, 0.5);
        assert!(tunables.limit_sampling_rate);
        assert_eq!(tunables.sampling_rate_limit, 120);
        assert!(tunables.limit_sampling_distance);
        assert_eq!(tunables.sampling_distance_threshold, 4.0);
        assert!(!tunables.limit_refresh_rate);
        assert_eq!(tunables.stroke_style, StrokeStyle::Linear);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = Tunables::from_lookup(lookup(&[("SKETCHPAD_SMOOTHING", "smooth")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "SKETCHPAD_SMOOTHING",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_rates_keep_periods_finite() {
        // Fields are public, so a zero can bypass the setters
        let tunables = Tunables {
            sampling_rate_limit: 0,
            refresh_rate_limit: 0,
            ..Tunables::default()
        };

        assert_eq!(tunables.sampling_rate_limit, 0);
        assert_eq!(tunables.sampling_period_ms(), 1000.0);
        assert_eq!(tunables.refresh_period_ms(), 1000.0);
    }
}
