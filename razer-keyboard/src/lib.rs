//! High-level lighting interface for Razer keyboards
//!
//! [`KeyboardController`] drives one keyboard bound to the razerkbd driver:
//! one-shot hardware effects, indicator LEDs, device information reads and
//! the streaming custom matrix mode.

pub mod error;
pub mod led;

pub use error::KeyboardError;
pub use led::LedMatrix;
pub use razer_transport::{EffectColors, Rgb, WaveDirection};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use razer_transport::protocol::file;
use razer_transport::{
    ControlChannel, ControlFs, DevicePaths, EffectCommand, RowSpan, SetBreathe, SetGameLed,
    SetMacroLed, SetMacroLedEffect, SetNoEffect, SetReactive, SetSpectrum, SetStarlight,
    SetStatic, SetWave, SysfsFs, TransportError,
};
use tracing::debug;

/// Device information strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub device_type: String,
    pub serial: String,
    pub firmware_version: String,
}

/// Lighting controller for a single keyboard
///
/// Effects and reads borrow `&self`; custom matrix operations borrow
/// `&mut self` since they share the streaming channel.
pub struct KeyboardController {
    fs: Arc<dyn ControlFs>,
    paths: DevicePaths,
    channel: ControlChannel,
}

impl KeyboardController {
    /// Create a controller over the real driver files under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_backend(Arc::new(SysfsFs::new()), root)
    }

    /// Create a controller over any control-file backend
    ///
    /// # Arguments
    /// * `fs` - Backend used for every file operation
    /// * `root` - Driver directory containing the device folders
    pub fn with_backend(fs: Arc<dyn ControlFs>, root: impl Into<PathBuf>) -> Self {
        Self {
            channel: ControlChannel::new(Arc::clone(&fs)),
            fs,
            paths: DevicePaths::new(root, ""),
        }
    }

    // === Device Identity ===

    /// Select the device folder (e.g. `0003:1532:0226.0003`) to control.
    ///
    /// Rejected while custom matrix mode holds the current device's files open.
    pub fn set_device_folder_name(&mut self, name: impl Into<String>) -> Result<(), KeyboardError> {
        if self.channel.is_open() {
            return Err(KeyboardError::MatrixModeActive);
        }
        self.paths.set_folder(name);
        Ok(())
    }

    pub fn device_folder_name(&self) -> &str {
        self.paths.folder()
    }

    pub fn device_root(&self) -> &Path {
        self.paths.root()
    }

    /// Full path of a control file of the current device
    pub fn command_file_path(&self, file: &str) -> PathBuf {
        self.paths.resolve(file)
    }

    // === Device Info ===

    /// Get device full name
    pub async fn get_type(&self) -> Result<String, KeyboardError> {
        self.read_string(file::DEVICE_TYPE).await
    }

    /// Get device serial number
    pub async fn get_serial_number(&self) -> Result<String, KeyboardError> {
        self.read_string(file::DEVICE_SERIAL).await
    }

    /// Get firmware version
    pub async fn get_firmware_version(&self) -> Result<String, KeyboardError> {
        self.read_string(file::FIRMWARE_VERSION).await
    }

    /// Read type, serial and firmware version in sequence
    pub async fn get_device_info(&self) -> Result<DeviceInfo, KeyboardError> {
        Ok(DeviceInfo {
            device_type: self.get_type().await?,
            serial: self.get_serial_number().await?,
            firmware_version: self.get_firmware_version().await?,
        })
    }

    async fn read_string(&self, file: &str) -> Result<String, KeyboardError> {
        let raw = self.fs.read_file(&self.paths.resolve(file)).await?;
        Ok(String::from_utf8_lossy(&raw)
            .trim_end_matches(|c: char| c.is_whitespace() || c == '\0')
            .to_string())
    }

    // === Custom Matrix Mode ===

    /// Start custom matrix mode by opening the frame and commit files.
    ///
    /// Calling this while already initialised closes the old handles first.
    pub async fn init_custom_matrix_mode(&mut self) -> Result<(), KeyboardError> {
        self.channel.open(&self.paths).await?;
        Ok(())
    }

    /// Whether custom matrix mode is initialised
    pub fn is_custom_matrix_mode(&self) -> bool {
        self.channel.is_open()
    }

    /// Set the colors of `row_count` rows starting at `first_row`.
    ///
    /// `rgb` is the full-keyboard image (row-major, 22 LEDs x 3 bytes per
    /// row) and must cover rows up to `first_row + row_count`. Fails without
    /// any I/O if custom matrix mode is not initialised.
    pub async fn set_custom_matrix(
        &mut self,
        first_row: u8,
        row_count: u8,
        rgb: &[u8],
    ) -> Result<(), KeyboardError> {
        if !self.channel.is_open() {
            return Err(KeyboardError::MatrixModeInactive);
        }
        let span = RowSpan::new(first_row, row_count)?;
        // Encoding happens before any write, so a frame error is a bad argument
        self.channel
            .write_frame(span, rgb)
            .await
            .map_err(|e| match e {
                TransportError::Frame(e) => KeyboardError::from(e),
                e => KeyboardError::Transport(e),
            })
    }

    /// Send a whole [`LedMatrix`] image
    pub async fn set_custom_matrix_image(&mut self, matrix: &LedMatrix) -> Result<(), KeyboardError> {
        let span = RowSpan::full();
        self.set_custom_matrix(span.first_row(), span.row_count(), matrix.as_bytes())
            .await
    }

    /// Leave custom matrix mode. The keys keep their current colors.
    pub async fn finish_custom_matrix_mode(&mut self) {
        self.channel.close().await;
    }

    // === Effects ===

    /// Breathe: random colors, one color, or fading between two
    pub async fn set_breathe_effect_mode(&self, colors: EffectColors) -> Result<(), KeyboardError> {
        self.send(&SetBreathe::new(colors)).await
    }

    /// Starlight at `speed` with random, one or two colors
    pub async fn set_starlight_effect_mode(
        &self,
        speed: u8,
        colors: EffectColors,
    ) -> Result<(), KeyboardError> {
        self.send(&SetStarlight::new(speed, colors)).await
    }

    /// Reactive: pressed keys light up in `color`. Speed must be 1 to 3.
    pub async fn set_reactive_effect_mode(&self, speed: u8, color: Rgb) -> Result<(), KeyboardError> {
        let cmd = SetReactive::new(speed, color)?;
        self.send(&cmd).await
    }

    pub async fn set_spectrum_effect_mode(&self) -> Result<(), KeyboardError> {
        self.send(&SetSpectrum).await
    }

    pub async fn set_static_effect_mode(&self, color: Rgb) -> Result<(), KeyboardError> {
        self.send(&SetStatic::new(color)).await
    }

    pub async fn set_wave_effect_mode(&self, direction: WaveDirection) -> Result<(), KeyboardError> {
        self.send(&SetWave::new(direction)).await
    }

    pub async fn set_no_effect_mode(&self) -> Result<(), KeyboardError> {
        self.send(&SetNoEffect).await
    }

    // === Indicator LEDs ===

    pub async fn set_game_mode_led(&self, on: bool) -> Result<(), KeyboardError> {
        self.send(&SetGameLed(on)).await
    }

    pub async fn set_macro_led(&self, on: bool) -> Result<(), KeyboardError> {
        self.send(&SetMacroLed(on)).await
    }

    /// Macro LED blinking; only visible while the macro LED is on
    pub async fn set_macro_led_blinking(&self, on: bool) -> Result<(), KeyboardError> {
        self.send(&SetMacroLedEffect(on)).await
    }

    async fn send<C: EffectCommand + Sync>(&self, cmd: &C) -> Result<(), KeyboardError> {
        let payload = cmd.to_payload();
        debug!("{} <- {:02x?}", C::FILE, payload);
        self.fs
            .write_file(&self.paths.resolve(C::FILE), &payload)
            .await?;
        Ok(())
    }
}
