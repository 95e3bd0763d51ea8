//! Canvas 2D draw target
//!
//! Drawing calls use logical coordinates. The backing store is sized in
//! physical pixels and the context transform scales by the device pixel
//! ratio, so strokes stay crisp on high-density displays.

use sketching::{Color, DrawTarget, PathCommand, Vector2};
use sketchpad_config::DisplayConfig;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasTarget {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    display: DisplayConfig,
}

impl CanvasTarget {
    pub fn new(canvas: HtmlCanvasElement, display: DisplayConfig) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut target = Self {
            canvas,
            context,
            display,
        };
        target.set_viewport(&display);
        Ok(target)
    }

    #[allow(deprecated)]
    fn set_stroke(&self, line_width: f64, color: Color) {
        self.context.set_line_width(line_width);
        self.context
            .set_stroke_style(&JsValue::from_str(&color.to_css()));
    }
}

fn report(what: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        web_sys::console::error_2(&format!("Canvas {} failed:", what).into(), &e);
    }
}

impl DrawTarget for CanvasTarget {
    fn clear(&mut self) {
        self.context
            .clear_rect(0.0, 0.0, self.display.width_f64(), self.display.height_f64());
    }

    fn stroke_circle(&mut self, center: Vector2, radius: f64, line_width: f64, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.set_stroke(line_width, color);
        self.context.begin_path();
        report(
            "arc",
            self.context
                .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU),
        );
        self.context.stroke();
    }

    fn stroke_path(&mut self, path: &[PathCommand], line_width: f64, color: Color) {
        self.set_stroke(line_width, color);
        self.context.begin_path();
        for command in path {
            match *command {
                PathCommand::MoveTo(p) => self.context.move_to(p.x, p.y),
                PathCommand::LineTo(p) => self.context.line_to(p.x, p.y),
                PathCommand::CubicTo { ctrl1, ctrl2, end } => self
                    .context
                    .bezier_curve_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, end.x, end.y),
            }
        }
        self.context.stroke();
    }

    #[allow(deprecated)]
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: f64) {
        self.context.set_font(&format!("{}px monospace", font_size));
        self.context
            .set_fill_style(&JsValue::from_str(&Color::BLACK.to_css()));
        report("fill_text", self.context.fill_text(text, x, y));
    }

    fn set_viewport(&mut self, display: &DisplayConfig) {
        self.display = *display;
        self.canvas.set_width(display.scaled_width());
        self.canvas.set_height(display.scaled_height());
        report(
            "set_transform",
            self.context
                .set_transform(display.scale, 0.0, 0.0, display.scale, 0.0, 0.0),
        );
    }
}
