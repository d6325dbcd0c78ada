//! LED matrix image type

use razer_transport::protocol::matrix::{COLUMNS, IMAGE_LEN, ROWS};
use razer_transport::Rgb;

/// Full-keyboard RGB image, row-major, 3 bytes per LED.
///
/// `as_bytes()` is laid out the way `set_custom_matrix` indexes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedMatrix {
    data: Vec<u8>,
}

impl LedMatrix {
    /// All LEDs off
    pub fn new() -> Self {
        Self {
            data: vec![0; IMAGE_LEN],
        }
    }

    /// Every LED set to `color`
    pub fn filled(color: Rgb) -> Self {
        let mut matrix = Self::new();
        matrix.fill(color);
        matrix
    }

    /// Build from raw row-major RGB bytes; `None` unless exactly one full image
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        (data.len() == IMAGE_LEN).then_some(Self { data })
    }

    pub fn fill(&mut self, color: Rgb) {
        for led in self.data.chunks_exact_mut(3) {
            led.copy_from_slice(&color.to_bytes());
        }
    }

    /// Set one LED. Out-of-range positions are ignored.
    pub fn set(&mut self, row: usize, column: usize, color: Rgb) {
        if let Some(i) = Self::offset(row, column) {
            self.data[i..i + 3].copy_from_slice(&color.to_bytes());
        }
    }

    pub fn get(&self, row: usize, column: usize) -> Option<Rgb> {
        Self::offset(row, column).map(|i| Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    /// Set every LED of a row
    pub fn fill_row(&mut self, row: usize, color: Rgb) {
        for column in 0..COLUMNS {
            self.set(row, column, color);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(row: usize, column: usize) -> Option<usize> {
        (row < ROWS && column < COLUMNS).then(|| 3 * (row * COLUMNS + column))
    }
}

impl Default for LedMatrix {
    fn default() -> Self {
        Self::new()
    }
}
