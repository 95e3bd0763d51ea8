//! Draw targets: the 2D raster boundary

use sketchpad_config::DisplayConfig;

use crate::smoothing::PathCommand;
use crate::vector::Vector2;

/// Straight RGBA color, components 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from hue (degrees), saturation and lightness (0.0-1.0)
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;

        Self::rgba((r + m) as f32, (g + m) as f32, (b + m) as f32, 1.0)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// CSS `rgba()` string for canvas style properties
    pub fn to_css(self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a
        )
    }
}

/// A 2D drawing surface
pub trait DrawTarget {
    /// Clear the whole surface
    fn clear(&mut self);

    /// Outline a circle; coordinates are in logical units
    fn stroke_circle(&mut self, center: Vector2, radius: f64, line_width: f64, color: Color);

    /// Outline a path; coordinates are in logical units
    fn stroke_path(&mut self, path: &[PathCommand], line_width: f64, color: Color);

    /// Draw one line of text with its baseline at `y`
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: f64);

    /// The viewport changed: re-derive pixel dimensions and the drawing scale
    fn set_viewport(&mut self, display: &DisplayConfig);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vector2,
        radius: f64,
        line_width: f64,
        color: Color,
    },
    Path {
        path: Vec<PathCommand>,
        line_width: f64,
        color: Color,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        font_size: f64,
    },
    Viewport(DisplayConfig),
}

/// Draw target that records every call
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    commands: Vec<DrawCommand>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn path_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Path { .. }))
            .count()
    }

    /// Recorded text lines, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawTarget for RecordingTarget {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_circle(&mut self, center: Vector2, radius: f64, line_width: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            line_width,
            color,
        });
    }

    fn stroke_path(&mut self, path: &[PathCommand], line_width: f64, color: Color) {
        self.commands.push(DrawCommand::Path {
            path: path.to_vec(),
            line_width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: f64) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font_size,
        });
    }

    fn set_viewport(&mut self, display: &DisplayConfig) {
        self.commands.push(DrawCommand::Viewport(*display));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        let (a, b) = (a.to_array(), b.to_array());
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-3)
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(Color::from_hsl(0.0, 1.0, 0.5), Color::rgba(1.0, 0.0, 0.0, 1.0)));
        assert!(close(Color::from_hsl(120.0, 1.0, 0.5), Color::rgba(0.0, 1.0, 0.0, 1.0)));
        assert!(close(Color::from_hsl(240.0, 1.0, 0.5), Color::rgba(0.0, 0.0, 1.0, 1.0)));
        assert!(close(Color::from_hsl(360.0, 1.0, 0.5), Color::rgba(1.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_hsl_pastel() {
        // hsl(240, 80%, 60%) = #4747eb
        let c = Color::from_hsl(240.0, 0.8, 0.6);
        assert_eq!(c.to_css(), "rgba(71, 71, 235, 1)");
    }

    #[test]
    fn test_recording_target() {
        let mut target = RecordingTarget::new();
        target.clear();
        target.stroke_circle(Vector2::ZERO, 5.0, 0.75, Color::BLACK);
        target.fill_text("hello", 0.0, 10.0, 10.0);

        assert_eq!(target.circle_count(), 1);
        assert_eq!(target.path_count(), 0);
        assert_eq!(target.texts(), vec!["hello"]);
        assert_eq!(target.take().len(), 3);
        assert!(target.commands().is_empty());
    }
}
