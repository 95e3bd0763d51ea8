//! Shared configuration for Sketchpad
//!
//! This crate is the single source of truth for the live-tunable drawing
//! parameters and the display/viewport settings shared by the native driver
//! and the browser frontend.

mod tunables;

pub use tunables::{ConfigError, StrokeStyle, TunableUpdate, Tunables};

use serde::{Deserialize, Serialize};

/// Default logical surface width
pub const DEFAULT_WIDTH: u32 = 1280;

/// Default logical surface height
pub const DEFAULT_HEIGHT: u32 = 720;

/// Default device pixel ratio (1.0 = no scaling)
pub const DEFAULT_SCALE: f64 = 1.0;

/// Smoothing coefficient K used for control point placement
pub const DEFAULT_SMOOTHING: f64 = 0.35;

/// Sampling rate limit in events/sec. This value also means "unlimited".
pub const UNLIMITED_SAMPLING_RATE: u32 = 1000;

/// Default distance threshold for the sampling distance gate
pub const DEFAULT_SAMPLING_DISTANCE: f64 = 10.0;

/// Default refresh rate limit in frames/sec
pub const DEFAULT_REFRESH_RATE: u32 = 60;

/// Frames the render loop may lag behind before it resyncs
pub const DEFAULT_MAX_CATCH_UP_FRAMES: u32 = 2;

/// Display configuration for the drawing surface
///
/// `width`/`height` are logical units (CSS pixels in the browser); stroke
/// coordinates live in this space. `scale` is the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Surface width in logical pixels
    pub width: u32,
    /// Surface height in logical pixels
    pub height: u32,
    /// Device pixel ratio
    pub scale: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
        }
    }
}

impl DisplayConfig {
    /// Create a new display config with the given logical dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scale: DEFAULT_SCALE,
        }
    }

    /// Builder-style device pixel ratio override.
    ///
    /// Non-finite or non-positive ratios fall back to 1.0, matching the
    /// browser's `devicePixelRatio ?? 1`.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            DEFAULT_SCALE
        };
        self
    }

    /// Get width as f64 for calculations
    pub fn width_f64(&self) -> f64 {
        self.width as f64
    }

    /// Get height as f64 for calculations
    pub fn height_f64(&self) -> f64 {
        self.height as f64
    }

    /// Surface width in physical pixels
    pub fn scaled_width(&self) -> u32 {
        (self.width as f64 * self.scale) as u32
    }

    /// Surface height in physical pixels
    pub fn scaled_height(&self) -> u32 {
        (self.height as f64 * self.scale) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DisplayConfig::default();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.scale, DEFAULT_SCALE);
    }

    #[test]
    fn test_scaled_dimensions() {
        let config = DisplayConfig::new(800, 600).with_scale(2.0);
        assert_eq!(config.scaled_width(), 1600);
        assert_eq!(config.scaled_height(), 1200);
    }

    #[test]
    fn test_invalid_scale_falls_back() {
        assert_eq!(DisplayConfig::default().with_scale(0.0).scale, 1.0);
        assert_eq!(DisplayConfig::default().with_scale(f64::NAN).scale, 1.0);
        assert_eq!(DisplayConfig::default().with_scale(1.5).scale, 1.5);
    }
}
