//! CPU raster surface - software draw target
//!
//! Pixels are stored as straight-alpha `[f32; 4]` in physical pixels.
//! Drawing calls take logical coordinates and are scaled by the device pixel
//! ratio of the current viewport. Text is not rasterized; the last frame's
//! overlay lines are kept for inspection instead.

use glam::DVec2;
use sketchpad_config::DisplayConfig;
use tracing::debug;

use crate::constants::MAX_CURVE_STEPS;
use crate::render::{Color, DrawTarget};
use crate::smoothing::{CubicSegment, PathCommand};
use crate::vector::Vector2;

/// A software RGBA surface implementing [`DrawTarget`]
pub struct CpuSurface {
    /// Surface dimensions in physical pixels
    pub width: u32,
    pub height: u32,
    /// Logical-to-physical scale (device pixel ratio)
    scale: f64,
    background: [f32; 4],
    /// Pixel data in row-major order
    pixels: Vec<[f32; 4]>,
    overlay_text: Vec<String>,
}

impl CpuSurface {
    /// Create a surface for a viewport, cleared to white
    pub fn new(display: &DisplayConfig) -> Self {
        Self::with_background(display, Color::WHITE)
    }

    pub fn with_background(display: &DisplayConfig, background: Color) -> Self {
        let width = display.scaled_width();
        let height = display.scaled_height();
        let background = background.to_array();
        Self {
            width,
            height,
            scale: display.scale,
            background,
            pixels: vec![background; (width as usize) * (height as usize)],
            overlay_text: Vec::new(),
        }
    }

    /// Get a pixel at the given physical coordinates
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    /// Blend a color onto an existing pixel: out = src * alpha + dst * (1 - alpha)
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [f32; 4], opacity: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        let dst = self.pixels[index];

        let src_alpha = color[3] * opacity;
        let inv_src_alpha = 1.0 - src_alpha;

        self.pixels[index] = [
            color[0] * src_alpha + dst[0] * inv_src_alpha,
            color[1] * src_alpha + dst[1] * inv_src_alpha,
            color[2] * src_alpha + dst[2] * inv_src_alpha,
            src_alpha + dst[3] * inv_src_alpha,
        ];
    }

    /// Raw pixel data as bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Number of pixels that differ from the background
    pub fn covered_pixel_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p != self.background).count()
    }

    /// Overlay lines drawn since the last clear
    pub fn overlay_text(&self) -> &[String] {
        &self.overlay_text
    }

    fn to_physical(&self, point: Vector2) -> DVec2 {
        DVec2::from(point) * self.scale
    }

    /// Blend every pixel whose center is within `half_width` of the set
    /// described by `distance`, restricted to the bounding box `[min, max]`
    fn cover(
        &mut self,
        min: DVec2,
        max: DVec2,
        half_width: f64,
        color: [f32; 4],
        distance: impl Fn(DVec2) -> f64,
    ) {
        let reach = half_width + 1.0;
        let x0 = (min.x - reach).floor().max(0.0) as u32;
        let y0 = (min.y - reach).floor().max(0.0) as u32;
        let x1 = ((max.x + reach).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((max.y + reach).ceil().max(0.0) as u32).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let center = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let coverage = (half_width + 0.5 - distance(center)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, coverage as f32);
                }
            }
        }
    }

    fn stroke_segment(&mut self, a: DVec2, b: DVec2, half_width: f64, color: [f32; 4]) {
        self.cover(a.min(b), a.max(b), half_width, color, |p| {
            distance_to_segment(p, a, b)
        });
    }

    fn flatten_cubic(&self, segment: &CubicSegment) -> usize {
        let length = segment.control_polygon_length() * self.scale;
        ((length / 2.0).ceil() as usize).clamp(1, MAX_CURVE_STEPS)
    }
}

fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    let t = if len2 > 0.0 {
        ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    p.distance(a + ab * t)
}

impl DrawTarget for CpuSurface {
    fn clear(&mut self) {
        self.pixels.fill(self.background);
        self.overlay_text.clear();
    }

    fn stroke_circle(&mut self, center: Vector2, radius: f64, line_width: f64, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let center = self.to_physical(center);
        let radius = radius * self.scale;
        let half_width = (line_width * self.scale / 2.0).max(0.5);
        let extent = DVec2::splat(radius);

        self.cover(center - extent, center + extent, half_width, color.to_array(), |p| {
            (p.distance(center) - radius).abs()
        });
    }

    fn stroke_path(&mut self, path: &[PathCommand], line_width: f64, color: Color) {
        let half_width = (line_width * self.scale / 2.0).max(0.5);
        let color = color.to_array();
        let mut current: Option<Vector2> = None;

        for command in path {
            match *command {
                PathCommand::MoveTo(p) => current = Some(p),
                PathCommand::LineTo(p) => {
                    if let Some(from) = current {
                        let (a, b) = (self.to_physical(from), self.to_physical(p));
                        self.stroke_segment(a, b, half_width, color);
                    }
                    current = Some(p);
                }
                PathCommand::CubicTo { ctrl1, ctrl2, end } => {
                    if let Some(start) = current {
                        let segment = CubicSegment {
                            start,
                            ctrl1,
                            ctrl2,
                            end,
                        };
                        let steps = self.flatten_cubic(&segment);
                        let mut prev = self.to_physical(start);
                        for step in 1..=steps {
                            let next = self.to_physical(segment.eval(step as f64 / steps as f64));
                            self.stroke_segment(prev, next, half_width, color);
                            prev = next;
                        }
                    }
                    current = Some(end);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, _x: f64, _y: f64, _font_size: f64) {
        self.overlay_text.push(text.to_string());
    }

    fn set_viewport(&mut self, display: &DisplayConfig) {
        self.width = display.scaled_width();
        self.height = display.scaled_height();
        self.scale = display.scale;
        self.pixels = vec![self.background; (self.width as usize) * (self.height as usize)];
        let (logical_width, logical_height) = (display.width, display.height);
        debug!(
            "CpuSurface: viewport {}x{} @{} -> {}x{} pixels",
            logical_width, logical_height, self.scale, self.width, self.height
        );
    }
}
