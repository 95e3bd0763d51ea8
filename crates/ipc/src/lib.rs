//! IPC message protocol for Sketchpad
//!
//! Defines the pointer input types consumed by the drawing session and the
//! JSON messages exchanged with UI controls.

pub mod error;
pub mod input;
pub mod messages;

pub use error::IpcError;
pub use input::{parse_script, PointerEvent, PointerObservation, PointerType, TimedInput};
pub use messages::{SketchToUi, UiToSketch};
