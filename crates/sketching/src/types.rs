use serde::{Deserialize, Serialize};
use sketchpad_ipc::PointerObservation;

use crate::vector::Vector2;

/// Errors raised when a stroke's append-only invariants would be broken
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StrokeError {
    #[error("Stroke is finished and can no longer be appended to")]
    Finished,
    #[error("Sample at {time_ms}ms precedes the last sample at {last_ms}ms")]
    OutOfOrder { time_ms: f64, last_ms: f64 },
}

/// One accepted pointer observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Position in logical surface units
    pub point: Vector2,
    /// Pressure, typically 0.0-1.0
    pub pressure: f64,
    /// Tilt in degrees (x, y)
    pub tilt: Vector2,
    /// Acceptance time in milliseconds
    pub time_ms: f64,
}

impl Sample {
    pub fn new(point: Vector2, pressure: f64, tilt: Vector2, time_ms: f64) -> Self {
        Self {
            point,
            pressure,
            tilt,
            time_ms,
        }
    }

    /// Build a sample from a raw pointer observation
    pub fn from_observation(obs: &PointerObservation, time_ms: f64) -> Self {
        Self::new(
            Vector2::new(obs.offset_x, obs.offset_y),
            obs.pressure,
            Vector2::new(obs.tilt_x, obs.tilt_y),
            time_ms,
        )
    }
}

/// Ordered samples of one drag gesture
///
/// Appends must be in non-decreasing time order, and a finished stroke is
/// immutable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    samples: Vec<Sample>,
    finished: bool,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample
    pub fn push(&mut self, sample: Sample) -> Result<(), StrokeError> {
        if self.finished {
            return Err(StrokeError::Finished);
        }
        if let Some(last) = self.samples.last() {
            if sample.time_ms < last.time_ms {
                return Err(StrokeError::OutOfOrder {
                    time_ms: sample.time_ms,
                    last_ms: last.time_ms,
                });
            }
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Seal the stroke at the end of its gesture
    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// Sample before `index`, `None` at the start of the stroke
    pub fn previous(&self, index: usize) -> Option<&Sample> {
        index.checked_sub(1).and_then(|i| self.samples.get(i))
    }

    /// Sample after `index`, `None` at the end of the stroke
    pub fn next(&self, index: usize) -> Option<&Sample> {
        index.checked_add(1).and_then(|i| self.samples.get(i))
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }
}

/// The drawing: every stroke of the session, in creation order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    strokes: Vec<Stroke>,
}

impl Image {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stroke and return its index
    pub fn add_stroke(&mut self, stroke: Stroke) -> usize {
        self.strokes.push(stroke);
        self.strokes.len() - 1
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stroke(&self, index: usize) -> Option<&Stroke> {
        self.strokes.get(index)
    }

    pub(crate) fn stroke_mut(&mut self, index: usize) -> Option<&mut Stroke> {
        self.strokes.get_mut(index)
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Total samples across all strokes
    pub fn sample_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }
}
