//! Still images for custom matrix mode
//!
//! An image maps one pixel to one key position, so it must match the
//! matrix exactly: 22 pixels wide, 9 tall, 8-bit RGB or RGBA.

use anyhow::{bail, Context};
use image::{ColorType, DynamicImage, GenericImageView};
use razer_keyboard::LedMatrix;
use razer_transport::protocol::matrix;
use std::path::Path;

/// Load an image file and convert it to a matrix frame
pub fn load_image<P: AsRef<Path>>(path: P) -> anyhow::Result<LedMatrix> {
    let path = path.as_ref();
    let img = image::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    image_to_matrix(&img)
}

/// Convert a decoded image to a matrix frame. Alpha is discarded.
pub fn image_to_matrix(img: &DynamicImage) -> anyhow::Result<LedMatrix> {
    let (width, height) = img.dimensions();
    if width as usize != matrix::COLUMNS || height as usize != matrix::ROWS {
        bail!(
            "image is {width}x{height}, expected {}x{}",
            matrix::COLUMNS,
            matrix::ROWS
        );
    }

    match img.color() {
        ColorType::Rgb8 | ColorType::Rgba8 => {}
        other => bail!("unsupported pixel format {other:?}, expected 8-bit RGB or RGBA"),
    }

    // Row-major RGB8 is exactly the matrix layout
    LedMatrix::from_bytes(img.to_rgb8().into_raw()).context("image size does not match matrix")
}
