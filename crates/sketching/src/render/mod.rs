//! Frame-rate gated render loop
//!
//! Each frame the loop clears the target, updates the rate counters, draws
//! every stroke (pressure circles, then the stroke path) and the debug
//! overlay. The next render time advances by one refresh period per rendered
//! frame rather than being re-derived from the frame time, which keeps the
//! long-run average at the limit. After a stall the schedule may fall behind;
//! it catches up with back-to-back frames, but never by more than
//! `max_catch_up_frames` before it resyncs to the current time.

mod overlay;
mod target;

pub use overlay::{draw_overlay, overlay_lines};
pub use target::{Color, DrawCommand, DrawTarget, RecordingTarget};

use sketchpad_config::Tunables;
use sketchpad_ipc::PointerObservation;
use tracing::debug;

use crate::constants::{
    CIRCLE_LINE_WIDTH, PRESSURE_RADIUS_SCALE, STROKE_LINE_WIDTH, ZERO_PRESSURE_HUE,
};
use crate::rate::RateCounter;
use crate::sampling::SamplingPolicy;
use crate::smoothing::stroke_path;
use crate::types::{Image, Stroke};

/// Diagnostics of a rendered frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub time_ms: f64,
    pub refresh_rate: u32,
    pub sampling_rate: u32,
    pub strokes: usize,
    pub samples: usize,
}

/// What the loop did with a frame callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Too early for the refresh limit; nothing was drawn
    Skipped,
    Rendered(FrameStats),
}

/// Color of a sample's pressure circle: blue at 0, red at 1
pub fn pressure_color(pressure: f64) -> Color {
    Color::from_hsl(ZERO_PRESSURE_HUE * (1.0 - pressure), 0.8, 0.6)
}

/// Pressure circles for every sample of a stroke
pub fn draw_sample_circles<T: DrawTarget + ?Sized>(stroke: &Stroke, target: &mut T) {
    for sample in stroke.iter() {
        target.stroke_circle(
            sample.point,
            sample.pressure * PRESSURE_RADIUS_SCALE,
            CIRCLE_LINE_WIDTH,
            pressure_color(sample.pressure),
        );
    }
}

/// Render loop state
#[derive(Debug, Clone, Default)]
pub struct RenderLoop {
    next_render_time: f64,
    counter: RateCounter,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_render_time(&self) -> f64 {
        self.next_render_time
    }

    /// Frames rendered in the last completed second
    pub fn rate(&self) -> u32 {
        self.counter.get()
    }

    /// Handle one frame callback at `time`
    pub fn frame<T: DrawTarget + ?Sized>(
        &mut self,
        time: f64,
        image: &Image,
        sampling: &mut SamplingPolicy,
        last_pointer: Option<&PointerObservation>,
        tunables: &Tunables,
        target: &mut T,
    ) -> FrameOutcome {
        if tunables.limit_refresh_rate && time < self.next_render_time {
            return FrameOutcome::Skipped;
        }

        let period = tunables.refresh_period_ms();
        if !tunables.limit_refresh_rate {
            self.next_render_time = time;
        } else {
            let lag = time - self.next_render_time;
            if lag > period * tunables.max_catch_up_frames as f64 {
                debug!(
                    "render: {:.1}ms behind schedule, resyncing at {:.1}ms",
                    lag, time
                );
                self.next_render_time = time;
            }
        }

        target.clear();
        self.counter.update_and_count(time);
        sampling.update_counter(time);

        for stroke in image.strokes() {
            if tunables.show_sample_circles {
                draw_sample_circles(stroke, target);
            }
            let path = stroke_path(stroke, tunables.stroke_style, tunables.smoothing);
            if !path.is_empty() {
                target.stroke_path(&path, STROKE_LINE_WIDTH, Color::BLACK);
            }
        }

        if tunables.show_debug_overlay {
            let lines = overlay_lines(self.counter.get(), sampling.rate(), image, last_pointer);
            draw_overlay(&lines, target);
        }

        self.next_render_time += period;

        FrameOutcome::Rendered(FrameStats {
            time_ms: time,
            refresh_rate: self.counter.get(),
            sampling_rate: sampling.rate(),
            strokes: image.stroke_count(),
            samples: image.sample_count(),
        })
    }
}
