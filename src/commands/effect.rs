//! Hardware effect and indicator LED command handlers.

use super::CommandResult;
use razer_keyboard::{EffectColors, KeyboardController, Rgb, WaveDirection};

/// Map optional CLI colors to the effect color choice
pub fn effect_colors(color: Option<Rgb>, color2: Option<Rgb>) -> EffectColors {
    match (color, color2) {
        (Some(c1), Some(c2)) => EffectColors::Dual(c1, c2),
        (Some(c1), None) => EffectColors::Single(c1),
        // clap requires --color before --color2
        (None, _) => EffectColors::Random,
    }
}

pub async fn breathe(
    keyboard: &KeyboardController,
    color: Option<Rgb>,
    color2: Option<Rgb>,
) -> CommandResult {
    let colors = effect_colors(color, color2);
    keyboard.set_breathe_effect_mode(colors).await?;
    println!("Breathe: {}", describe(colors));
    Ok(())
}

pub async fn starlight(
    keyboard: &KeyboardController,
    speed: u8,
    color: Option<Rgb>,
    color2: Option<Rgb>,
) -> CommandResult {
    let colors = effect_colors(color, color2);
    keyboard.set_starlight_effect_mode(speed, colors).await?;
    println!("Starlight: speed {speed}, {}", describe(colors));
    Ok(())
}

pub async fn reactive(keyboard: &KeyboardController, speed: u8, color: Rgb) -> CommandResult {
    keyboard.set_reactive_effect_mode(speed, color).await?;
    println!("Reactive: speed {speed}, {}", hex(color));
    Ok(())
}

pub async fn spectrum(keyboard: &KeyboardController) -> CommandResult {
    keyboard.set_spectrum_effect_mode().await?;
    println!("Spectrum");
    Ok(())
}

pub async fn static_color(keyboard: &KeyboardController, color: Rgb) -> CommandResult {
    keyboard.set_static_effect_mode(color).await?;
    println!("Static: {}", hex(color));
    Ok(())
}

pub async fn wave(keyboard: &KeyboardController, left: bool) -> CommandResult {
    let direction = if left {
        WaveDirection::Left
    } else {
        WaveDirection::Right
    };
    keyboard.set_wave_effect_mode(direction).await?;
    println!("Wave: {direction:?}");
    Ok(())
}

pub async fn none(keyboard: &KeyboardController) -> CommandResult {
    keyboard.set_no_effect_mode().await?;
    println!("Effects off");
    Ok(())
}

pub async fn game_led(keyboard: &KeyboardController, on: bool) -> CommandResult {
    keyboard.set_game_mode_led(on).await?;
    println!("Game LED: {}", on_off(on));
    Ok(())
}

pub async fn macro_led(keyboard: &KeyboardController, on: bool) -> CommandResult {
    keyboard.set_macro_led(on).await?;
    println!("Macro LED: {}", on_off(on));
    Ok(())
}

pub async fn macro_blink(keyboard: &KeyboardController, on: bool) -> CommandResult {
    keyboard.set_macro_led_blinking(on).await?;
    println!("Macro LED blinking: {}", on_off(on));
    Ok(())
}

fn hex(c: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)
}

fn describe(colors: EffectColors) -> String {
    match colors {
        EffectColors::Random => "random colors".to_string(),
        EffectColors::Single(c) => hex(c),
        EffectColors::Dual(a, b) => format!("{} / {}", hex(a), hex(b)),
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}
