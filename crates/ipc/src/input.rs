//! Pointer input types.
//!
//! These mirror the fields of a DOM `PointerEvent` that the drawing surface
//! cares about. They are transient: samples are derived from them, but the
//! observations themselves are never stored in a drawing.

use serde::{Deserialize, Serialize};

use crate::error::IpcError;

/// Kind of device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    #[default]
    Mouse,
    Pen,
    Touch,
    #[serde(other)]
    Unknown,
}

impl PointerType {
    /// Parse the DOM `pointerType` string.
    pub fn from_dom(value: &str) -> Self {
        match value {
            "mouse" => Self::Mouse,
            "pen" => Self::Pen,
            "touch" => Self::Touch,
            _ => Self::Unknown,
        }
    }
}

/// One raw pointer observation.
///
/// Serialized with the DOM's camelCase field names; the debug overlay uses
/// the same names.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerObservation {
    pub offset_x: f64,
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
    pub pressure: f64,
    pub tangential_pressure: f64,
    pub tilt_x: f64,
    pub tilt_y: f64,
    pub twist: f64,
    pub pointer_type: PointerType,
}

impl PointerObservation {
    /// Observation at a position with the given pressure and no tilt.
    pub fn at(offset_x: f64, offset_y: f64, pressure: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            width: 1.0,
            height: 1.0,
            pressure,
            ..Default::default()
        }
    }

    /// Builder-style tilt override.
    pub fn with_tilt(mut self, tilt_x: f64, tilt_y: f64) -> Self {
        self.tilt_x = tilt_x;
        self.tilt_y = tilt_y;
        self
    }

    /// Builder-style device override.
    pub fn with_pointer_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = pointer_type;
        self
    }

    /// `(field, value)` pairs in declaration order, for diagnostics.
    pub fn debug_entries(&self) -> Result<Vec<(String, String)>, IpcError> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(key, value)| {
                    let value = match value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Number(n) => match n.as_f64() {
                            Some(f) => format!("{f}"),
                            None => n.to_string(),
                        },
                        other => other.to_string(),
                    };
                    (key, value)
                })
                .collect()),
            other => Err(IpcError::InvalidFormat(format!(
                "pointer observation serialized as {other}"
            ))),
        }
    }
}

/// Pointer events delivered to the drawing session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PointerEvent {
    Down(PointerObservation),
    Move(PointerObservation),
    Up,
    Leave,
}

/// A pointer event with the platform timestamp it was observed at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedInput {
    pub time_ms: f64,
    pub event: PointerEvent,
}

/// Parse a JSON array of timed pointer events.
///
/// Timestamps must be non-decreasing, since the session relies on platform
/// delivery order.
pub fn parse_script(json: &str) -> Result<Vec<TimedInput>, IpcError> {
    let inputs: Vec<TimedInput> = serde_json::from_str(json)?;

    for pair in inputs.windows(2) {
        if pair[1].time_ms < pair[0].time_ms {
            return Err(IpcError::InvalidFormat(format!(
                "input at {}ms precedes input at {}ms",
                pair[1].time_ms, pair[0].time_ms
            )));
        }
    }

    Ok(inputs)
}
