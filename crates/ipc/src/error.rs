//! Errors raised while encoding or decoding sketch messages and scripts.

#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Well-formed JSON with the wrong shape, such as a pointer script whose
    /// timestamps go backwards or an observation that is not a JSON object
    #[error("Invalid sketch data: {0}")]
    InvalidFormat(String),
}
