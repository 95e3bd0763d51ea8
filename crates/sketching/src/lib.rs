//! Sketchpad core - pressure-sensitive freehand strokes
//!
//! This crate provides the drawing model and everything that turns pointer
//! input into rendered curves:
//! - [`types::Image`] / [`types::Stroke`] / [`types::Sample`] - the drawing
//! - [`sampling`] - rate and distance gates that filter pointer moves
//! - [`smoothing`] - Bezier control points from neighboring samples
//! - [`rate`] - one-second rolling rate meter
//! - [`render`] - frame-gated render loop over a [`render::DrawTarget`]
//! - [`surface`] - CPU raster draw target
//! - [`session`] - the mutable drawing session
//! - [`event_loop`] - channel-fed, single-consumer session driver

pub mod constants;
pub mod error;
pub mod event_loop;
pub mod rate;
pub mod render;
pub mod sampling;
pub mod session;
pub mod smoothing;
pub mod surface;
pub mod types;
pub mod vector;

pub use constants::*;
pub use error::SketchError;
pub use event_loop::{channel, EventLoop, LoopControl, SessionEvent, SessionHandle};
pub use rate::RateCounter;
pub use render::{
    Color, DrawCommand, DrawTarget, FrameOutcome, FrameStats, RecordingTarget, RenderLoop,
};
pub use sampling::{SampleDecision, SamplingPolicy};
pub use session::{Session, SessionNotice};
pub use smoothing::{control_points, stroke_path, stroke_segments, ControlPoints, CubicSegment, PathCommand};
pub use surface::CpuSurface;
pub use types::*;
pub use vector::Vector2;
