//! Message enums exchanged between the UI controls and the drawing session.

use serde::{Deserialize, Serialize};
use sketchpad_config::{DisplayConfig, TunableUpdate};

use crate::error::IpcError;

/// Messages from the drawing session to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SketchToUi {
    /// Diagnostics published once per rendered frame
    Stats {
        refresh_rate: u32,
        sampling_rate: u32,
        strokes: usize,
        samples: usize,
    },

    /// Error notification
    Error { code: String, message: String },
}

/// Messages from the UI to the drawing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToSketch {
    /// A slider or toggle changed
    UpdateTunable(TunableUpdate),

    /// The drawing surface was resized
    Resize(DisplayConfig),
}

impl UiToSketch {
    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl SketchToUi {
    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }
}
