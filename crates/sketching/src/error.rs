//! Error types for the drawing session.

use crate::types::StrokeError;

/// Errors surfaced by the session and its event loop
#[derive(Debug, thiserror::Error)]
pub enum SketchError {
    #[error("Session event loop is closed")]
    ChannelClosed,
    #[error("Stroke error: {0}")]
    Stroke(#[from] StrokeError),
}
