//! Generated frames for streaming mode

use crate::color::hsv_to_rgb;
use razer_keyboard::LedMatrix;
use razer_transport::protocol::matrix;

/// Full-width rainbow with each column one step further round the hue
/// circle. `phase` (degrees) shifts the whole pattern.
pub fn rainbow_frame(phase: f32) -> LedMatrix {
    let mut frame = LedMatrix::new();
    let step = 360.0 / matrix::COLUMNS as f32;
    for col in 0..matrix::COLUMNS {
        let color = hsv_to_rgb(phase + col as f32 * step, 1.0, 1.0);
        for row in 0..matrix::ROWS {
            frame.set(row, col, color);
        }
    }
    frame
}
