// CLI definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use razer_driver::color::parse_color;
use razer_transport::Rgb;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "razer-driver")]
#[command(author, version, about = "Razer keyboard lighting control for the razerkbd driver")]
#[command(propagate_version = true)]
pub struct Cli {
    /// razerkbd driver directory (default: from config, else /sys/bus/hid/drivers/razerkbd)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Device folder, e.g. 0003:1532:0226.0003 (default: from config)
    #[arg(short, long, global = true, value_name = "FOLDER")]
    pub device: Option<String>,

    /// Config file path (default: ~/.config/razer-driver/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print every control-file operation
    #[arg(long, global = true)]
    pub monitor: bool,

    /// Show full payload hex instead of a summary
    #[arg(long, global = true)]
    pub hex: bool,

    /// Filter monitor output (all, frames, effects, file=NAME)
    #[arg(long, global = true)]
    pub filter: Option<String>,

    /// Don't touch the device; record writes in memory and print them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    // === Query Commands ===
    /// Show device type, serial number and firmware version
    #[command(visible_aliases = ["version", "i"])]
    Info,

    // === Effect Commands ===
    /// Breathe: random colors, one color, or alternating between two
    Breathe {
        /// First color (#rrggbb, rrggbb or r,g,b); random when omitted
        #[arg(short, long, value_parser = parse_color)]
        color: Option<Rgb>,
        /// Second color
        #[arg(long, value_parser = parse_color, requires = "color")]
        color2: Option<Rgb>,
    },

    /// Starlight: keys twinkle at random
    Starlight {
        /// Twinkle speed
        #[arg(short, long, default_value_t = 1)]
        speed: u8,
        /// First color; random when omitted
        #[arg(short, long, value_parser = parse_color)]
        color: Option<Rgb>,
        /// Second color
        #[arg(long, value_parser = parse_color, requires = "color")]
        color2: Option<Rgb>,
    },

    /// Reactive: pressed keys light up and fade
    Reactive {
        /// Fade speed (1-3)
        #[arg(short, long, default_value_t = 2)]
        speed: u8,
        /// Color (#rrggbb, rrggbb or r,g,b)
        #[arg(value_parser = parse_color)]
        color: Rgb,
    },

    /// Spectrum: cycle through all hues
    #[command(visible_alias = "cycle")]
    Spectrum,

    /// Static: one color on every key
    Static {
        /// Color (#rrggbb, rrggbb or r,g,b)
        #[arg(value_parser = parse_color)]
        color: Rgb,
    },

    /// Wave: a rainbow travelling across the keyboard
    Wave {
        /// Travel right to left
        #[arg(long)]
        left: bool,
    },

    /// Turn matrix effects off
    #[command(name = "none", visible_alias = "off")]
    NoEffect,

    // === Indicator LEDs ===
    /// Game mode LED
    GameLed { state: Toggle },

    /// Macro recording LED
    MacroLed { state: Toggle },

    /// Macro LED blinking
    MacroBlink { state: Toggle },

    // === Custom Matrix Commands ===
    /// Show a solid color through custom matrix mode
    Fill {
        /// Color (#rrggbb, rrggbb or r,g,b)
        #[arg(value_parser = parse_color)]
        color: Rgb,
    },

    /// Show a 22x9 PNG image on the keys
    Image {
        /// PNG file (8-bit RGB or RGBA, 22 wide, 9 tall)
        file: PathBuf,
    },

    /// Stream an animated rainbow until Ctrl-C
    Rainbow {
        /// Frames per second
        #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=120))]
        fps: u32,
    },

    // === Utility Commands ===
    /// Remember a device folder in the config file
    SetDevice {
        /// Folder name under the driver root
        folder: String,
    },
}

/// LED on/off argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        self == Toggle::On
    }
}
