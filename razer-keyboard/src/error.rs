//! Keyboard interface error types

use razer_transport::{FrameError, InvalidSpeed, TransportError};
use thiserror::Error;

/// Errors from keyboard operations
#[derive(Error, Debug)]
pub enum KeyboardError {
    /// Transport layer error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Reactive effect speed out of range
    #[error(transparent)]
    InvalidSpeed(#[from] InvalidSpeed),

    /// Invalid parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Custom matrix update without an open channel
    #[error("Custom matrix mode is not initialised")]
    MatrixModeInactive,

    /// Device identity change while the channel holds its files open
    #[error("Custom matrix mode is active; finish it before changing device")]
    MatrixModeActive,
}

impl From<FrameError> for KeyboardError {
    fn from(e: FrameError) -> Self {
        KeyboardError::InvalidParameter(e.to_string())
    }
}
