//! Type-safe effect command builders
//!
//! Each hardware effect is a single write of a short payload to its own
//! control file. Payload shape depends on which colors the caller picked,
//! so the color choice is an explicit variant rather than optional arguments.

use crate::error::InvalidSpeed;
use crate::protocol::{self, ascii, file};

// =============================================================================
// Core Trait
// =============================================================================

/// A command that can be serialized to a control-file payload
pub trait EffectCommand {
    /// Control file the payload is written to
    const FILE: &'static str;

    /// Serialize the payload bytes
    fn to_payload(&self) -> Vec<u8>;
}

// =============================================================================
// Colors
// =============================================================================

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Color selection for effects that accept zero, one or two colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectColors {
    /// Driver picks pseudo-random colors
    #[default]
    Random,
    /// One fixed color
    Single(Rgb),
    /// Alternate between two colors
    Dual(Rgb, Rgb),
}

impl EffectColors {
    fn extend_payload(&self, payload: &mut Vec<u8>) {
        match self {
            Self::Random => {}
            Self::Single(c) => payload.extend_from_slice(&c.to_bytes()),
            Self::Dual(c1, c2) => {
                payload.extend_from_slice(&c1.to_bytes());
                payload.extend_from_slice(&c2.to_bytes());
            }
        }
    }
}

// =============================================================================
// Matrix Effects
// =============================================================================

/// Breathe: fade in and out. 1 byte (random), 3 bytes (one color) or 6 bytes (two colors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetBreathe {
    pub colors: EffectColors,
}

impl SetBreathe {
    pub fn new(colors: EffectColors) -> Self {
        Self { colors }
    }
}

impl EffectCommand for SetBreathe {
    const FILE: &'static str = file::MATRIX_EFFECT_BREATH;

    fn to_payload(&self) -> Vec<u8> {
        match self.colors {
            // Random mode is selected by a lone 0x01
            EffectColors::Random => vec![protocol::BREATH_RANDOM],
            colors => {
                let mut payload = Vec::with_capacity(6);
                colors.extend_payload(&mut payload);
                payload
            }
        }
    }
}

/// Starlight: twinkling keys. Speed byte followed by zero, one or two colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetStarlight {
    pub speed: u8,
    pub colors: EffectColors,
}

impl SetStarlight {
    pub fn new(speed: u8, colors: EffectColors) -> Self {
        Self { speed, colors }
    }
}

impl EffectCommand for SetStarlight {
    const FILE: &'static str = file::MATRIX_EFFECT_STARLIGHT;

    fn to_payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(7);
        payload.push(self.speed);
        self.colors.extend_payload(&mut payload);
        payload
    }
}

/// Reactive: keys light up when pressed. `[speed, R, G, B]`
///
/// Fields are private so the speed is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetReactive {
    speed: u8,
    color: Rgb,
}

impl SetReactive {
    /// Speed must be 1 to 3
    pub fn new(speed: u8, color: Rgb) -> Result<Self, InvalidSpeed> {
        if !(protocol::REACTIVE_SPEED_MIN..=protocol::REACTIVE_SPEED_MAX).contains(&speed) {
            return Err(InvalidSpeed { speed });
        }
        Ok(Self { speed, color })
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

impl EffectCommand for SetReactive {
    const FILE: &'static str = file::MATRIX_EFFECT_REACTIVE;

    fn to_payload(&self) -> Vec<u8> {
        vec![self.speed, self.color.r, self.color.g, self.color.b]
    }
}

/// Spectrum: cycle through all hues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetSpectrum;

impl EffectCommand for SetSpectrum {
    const FILE: &'static str = file::MATRIX_EFFECT_SPECTRUM;

    fn to_payload(&self) -> Vec<u8> {
        vec![protocol::EFFECT_PLAIN]
    }
}

/// Static: one color on every key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetStatic {
    pub color: Rgb,
}

impl SetStatic {
    pub fn new(color: Rgb) -> Self {
        Self { color }
    }
}

impl EffectCommand for SetStatic {
    const FILE: &'static str = file::MATRIX_EFFECT_STATIC;

    fn to_payload(&self) -> Vec<u8> {
        self.color.to_bytes().to_vec()
    }
}

/// Wave travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveDirection {
    /// Sent as ASCII '1'
    #[default]
    Right,
    /// Sent as ASCII '2'
    Left,
}

impl WaveDirection {
    pub fn to_wire(self) -> u8 {
        match self {
            Self::Right => ascii::ONE,
            Self::Left => ascii::TWO,
        }
    }
}

/// Wave: rainbow wave across the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetWave {
    pub direction: WaveDirection,
}

impl SetWave {
    pub fn new(direction: WaveDirection) -> Self {
        Self { direction }
    }
}

impl EffectCommand for SetWave {
    const FILE: &'static str = file::MATRIX_EFFECT_WAVE;

    fn to_payload(&self) -> Vec<u8> {
        vec![self.direction.to_wire()]
    }
}

/// None: switch matrix effects off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetNoEffect;

impl EffectCommand for SetNoEffect {
    const FILE: &'static str = file::MATRIX_EFFECT_NONE;

    fn to_payload(&self) -> Vec<u8> {
        vec![protocol::EFFECT_PLAIN]
    }
}

// =============================================================================
// Indicator LEDs
// =============================================================================

/// Game mode LED on/off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetGameLed(pub bool);

impl EffectCommand for SetGameLed {
    const FILE: &'static str = file::GAME_LED_STATE;

    fn to_payload(&self) -> Vec<u8> {
        vec![ascii::flag(self.0)]
    }
}

/// Macro LED on/off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetMacroLed(pub bool);

impl EffectCommand for SetMacroLed {
    const FILE: &'static str = file::MACRO_LED_STATE;

    fn to_payload(&self) -> Vec<u8> {
        vec![ascii::flag(self.0)]
    }
}

/// Macro LED blinking on/off (only visible while the macro LED is on)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetMacroLedEffect(pub bool);

impl EffectCommand for SetMacroLedEffect {
    const FILE: &'static str = file::MACRO_LED_EFFECT;

    fn to_payload(&self) -> Vec<u8> {
        vec![ascii::flag(self.0)]
    }
}
