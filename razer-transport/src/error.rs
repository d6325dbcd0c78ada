//! Transport error types

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::protocol::{REACTIVE_SPEED_MAX, REACTIVE_SPEED_MIN};

/// Errors that can occur during control-file operations
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("{op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Permission denied: {}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Custom matrix channel is not open")]
    ChannelClosed,

    #[error(transparent)]
    Frame(#[from] FrameError),
}

impl TransportError {
    /// Wrap an I/O error from `op` on `path`, splitting out permission failures
    pub fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            TransportError::PermissionDenied {
                path: path.to_path_buf(),
                source,
            }
        } else {
            TransportError::Io {
                op,
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Underlying OS error kind, if this came from a file operation
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io { source, .. } | Self::PermissionDenied { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Errors from frame encoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("Row range {first_row}+{row_count} outside the 0..{rows} matrix", rows = crate::protocol::matrix::ROWS)]
    RowRange { first_row: u8, row_count: u8 },

    #[error("RGB data too short: expected at least {expected} bytes, got {actual}")]
    RgbTooShort { expected: usize, actual: usize },

    #[error("Frame buffer holds {capacity} bytes, frame needs {needed}")]
    BufferTooSmall { needed: usize, capacity: usize },
}

/// Reactive effect speed outside the accepted range
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error(
    "invalid speed {speed}: reactive speed must be {min} to {max}",
    min = REACTIVE_SPEED_MIN,
    max = REACTIVE_SPEED_MAX
)]
pub struct InvalidSpeed {
    pub speed: u8,
}
