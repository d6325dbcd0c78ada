// Color conversion and parsing utilities

use razer_transport::Rgb;

/// Convert HSV to RGB
/// h: hue (0-360)
/// s: saturation (0-1)
/// v: value/brightness (0-1)
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb::new(
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}

/// Parse a color given as `#rrggbb`, `rrggbb` or `r,g,b`
///
/// Usable directly as a clap `value_parser`.
pub fn parse_color(s: &str) -> Result<Rgb, String> {
    let s = s.trim();

    if s.contains(',') {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("expected r,g,b but got '{s}'"));
        }
        let mut channels = [0u8; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| format!("invalid color channel '{part}' (0-255)"))?;
        }
        return Ok(Rgb::new(channels[0], channels[1], channels[2]));
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected #rrggbb but got '{s}'"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("invalid hex color '{s}'"))
    };
    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_to_rgb() {
        // Red
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::RED);
        // Green
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb::GREEN);
        // Blue
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb::BLUE);
        // White (no saturation)
        assert_eq!(hsv_to_rgb(0.0, 0.0, 1.0), Rgb::WHITE);
        // Black (no value)
        assert_eq!(hsv_to_rgb(0.0, 1.0, 0.0), Rgb::BLACK);
        // Hue wraps
        assert_eq!(hsv_to_rgb(480.0, 1.0, 1.0), Rgb::GREEN);
    }

    #[test]
    fn test_parse_color_forms() {
        let expected = Rgb::new(0x12, 0xab, 0xff);
        assert_eq!(parse_color("#12abff"), Ok(expected));
        assert_eq!(parse_color("12ABFF"), Ok(expected));
        assert_eq!(parse_color("18, 171, 255"), Ok(expected));
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        assert!(parse_color("#12ab").is_err());
        assert!(parse_color("zzzzzz").is_err());
        assert!(parse_color("1,2").is_err());
        assert!(parse_color("1,2,300").is_err());
        assert!(parse_color("#ééé").is_err());
    }
}
