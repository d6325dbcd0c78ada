//! Control-file transport for Razer keyboards
//!
//! The razerkbd driver exposes each keyboard as a directory of attribute
//! files. This crate covers everything below the keyboard API:
//!
//! - path resolution for a device's control files
//! - the custom-matrix frame encoding and effect payload builders
//! - file backends (real sysfs, in-memory, and a printing middleware)
//! - the two-handle streaming channel used by custom matrix mode

pub mod backend;
pub mod channel;
pub mod command;
pub mod error;
pub mod frame;
pub mod memory;
pub mod paths;
pub mod printer;
pub mod protocol;

pub use backend::{ControlFs, ControlHandle, SysfsFs};
pub use channel::ControlChannel;
pub use command::{
    EffectColors, EffectCommand, Rgb, SetBreathe, SetGameLed, SetMacroLed, SetMacroLedEffect,
    SetNoEffect, SetReactive, SetSpectrum, SetStarlight, SetStatic, SetWave, WaveDirection,
};
pub use error::{FrameError, InvalidSpeed, TransportError};
pub use frame::{FrameBuffer, RowHeader, RowSpan};
pub use memory::{FsOp, MemoryFs};
pub use paths::DevicePaths;
pub use printer::{FileFilter, PrinterConfig, PrinterFs};
pub use protocol::DEFAULT_DEVICE_ROOT;
