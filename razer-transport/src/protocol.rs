//! Protocol constants for the razerkbd control-file interface

/// Directory the razerkbd driver exposes its bound devices under
pub const DEFAULT_DEVICE_ROOT: &str = "/sys/bus/hid/drivers/razerkbd";

/// Control file names (one per driver attribute)
pub mod file {
    // Custom matrix streaming
    pub const MATRIX_CUSTOM_FRAME: &str = "matrix_custom_frame";
    pub const MATRIX_EFFECT_CUSTOM: &str = "matrix_effect_custom";

    // Hardware effects
    pub const MATRIX_EFFECT_BREATH: &str = "matrix_effect_breath";
    pub const MATRIX_EFFECT_STARLIGHT: &str = "matrix_effect_starlight";
    pub const MATRIX_EFFECT_REACTIVE: &str = "matrix_effect_reactive";
    pub const MATRIX_EFFECT_SPECTRUM: &str = "matrix_effect_spectrum";
    pub const MATRIX_EFFECT_STATIC: &str = "matrix_effect_static";
    pub const MATRIX_EFFECT_WAVE: &str = "matrix_effect_wave";
    pub const MATRIX_EFFECT_NONE: &str = "matrix_effect_none";

    // Indicator LEDs
    pub const GAME_LED_STATE: &str = "game_led_state";
    pub const MACRO_LED_STATE: &str = "macro_led_state";
    pub const MACRO_LED_EFFECT: &str = "macro_led_effect";

    // Read-only device information
    pub const DEVICE_TYPE: &str = "device_type";
    pub const DEVICE_SERIAL: &str = "device_serial";
    pub const FIRMWARE_VERSION: &str = "firmware_version";

    /// Get a human-readable name for a control file
    pub fn name(file: &str) -> &'static str {
        match file {
            MATRIX_CUSTOM_FRAME => "CUSTOM_FRAME",
            MATRIX_EFFECT_CUSTOM => "CUSTOM_COMMIT",
            MATRIX_EFFECT_BREATH => "BREATH",
            MATRIX_EFFECT_STARLIGHT => "STARLIGHT",
            MATRIX_EFFECT_REACTIVE => "REACTIVE",
            MATRIX_EFFECT_SPECTRUM => "SPECTRUM",
            MATRIX_EFFECT_STATIC => "STATIC",
            MATRIX_EFFECT_WAVE => "WAVE",
            MATRIX_EFFECT_NONE => "NONE",
            GAME_LED_STATE => "GAME_LED",
            MACRO_LED_STATE => "MACRO_LED",
            MACRO_LED_EFFECT => "MACRO_LED_EFFECT",
            DEVICE_TYPE => "DEVICE_TYPE",
            DEVICE_SERIAL => "DEVICE_SERIAL",
            FIRMWARE_VERSION => "FIRMWARE_VERSION",
            _ => "UNKNOWN",
        }
    }

    /// Whether a control file selects a hardware effect or indicator state
    pub fn is_effect(file: &str) -> bool {
        (file.starts_with("matrix_effect_") && file != MATRIX_EFFECT_CUSTOM)
            || matches!(file, GAME_LED_STATE | MACRO_LED_STATE | MACRO_LED_EFFECT)
    }
}

/// ASCII bytes the driver parses as flags
pub mod ascii {
    pub const ZERO: u8 = b'0';
    pub const ONE: u8 = b'1';
    pub const TWO: u8 = b'2';

    /// Encode a boolean flag as ASCII '1'/'0'
    pub fn flag(on: bool) -> u8 {
        if on {
            ONE
        } else {
            ZERO
        }
    }
}

/// LED matrix geometry
pub mod matrix {
    /// Key rows
    pub const ROWS: usize = 9;
    /// LEDs per row
    pub const COLUMNS: usize = 22;
    /// Last addressable column, sent as the row end column
    pub const LAST_COLUMN: u8 = (COLUMNS - 1) as u8;
    /// Row index, start column, end column
    pub const ROW_HEADER_LEN: usize = 3;
    /// RGB bytes in a single row
    pub const ROW_RGB_LEN: usize = COLUMNS * 3;
    /// Header plus pixel data for one row
    pub const ROW_PACKET_LEN: usize = ROW_HEADER_LEN + ROW_RGB_LEN; // 69
    /// Size of a frame covering every row
    pub const FRAME_BUFFER_LEN: usize = ROWS * ROW_PACKET_LEN; // 621
    /// RGB bytes for a full-keyboard image
    pub const IMAGE_LEN: usize = ROWS * ROW_RGB_LEN; // 594
}

/// Commit trigger written to `matrix_effect_custom` after each frame
pub const COMMIT_TRIGGER: [u8; 1] = [ascii::ONE];

/// Reactive effect speed bounds (inclusive)
pub const REACTIVE_SPEED_MIN: u8 = 1;
pub const REACTIVE_SPEED_MAX: u8 = 3;

/// Payload byte selecting random colors for breathe.
///
/// Raw 0x01, not ASCII. The driver treats any 1-byte breathe write as random.
pub const BREATH_RANDOM: u8 = 1;

/// Payload byte written to spectrum and none
pub const EFFECT_PLAIN: u8 = 0;
