//! Custom-matrix frame encoding
//!
//! A frame is a sequence of row packets written to `matrix_custom_frame`:
//!
//! ```text
//! [row][start col = 0][end col = 21][R,G,B x 22]
//! ```
//!
//! Row `r` is taken from the caller's full-keyboard RGB image at byte offset
//! `3 * (r * 22 + col)`, so a partial update of rows `first..first+count`
//! still indexes the image by absolute row.

use crate::error::FrameError;
use crate::protocol::matrix::{
    COLUMNS, FRAME_BUFFER_LEN, LAST_COLUMN, ROWS, ROW_HEADER_LEN, ROW_PACKET_LEN, ROW_RGB_LEN,
};

/// A validated range of matrix rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    first_row: u8,
    row_count: u8,
}

impl RowSpan {
    /// Rows `first_row .. first_row + row_count`; must be non-empty and inside the matrix
    pub fn new(first_row: u8, row_count: u8) -> Result<Self, FrameError> {
        let end = first_row as usize + row_count as usize;
        if row_count == 0 || end > ROWS {
            return Err(FrameError::RowRange {
                first_row,
                row_count,
            });
        }
        Ok(Self {
            first_row,
            row_count,
        })
    }

    /// Every row of the matrix
    pub fn full() -> Self {
        Self {
            first_row: 0,
            row_count: ROWS as u8,
        }
    }

    pub fn first_row(&self) -> u8 {
        self.first_row
    }

    pub fn row_count(&self) -> u8 {
        self.row_count
    }

    /// Row indices covered by this span
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.first_row as usize..self.first_row as usize + self.row_count as usize
    }

    /// Encoded frame length for this span
    pub fn frame_len(&self) -> usize {
        frame_len(self.row_count as usize)
    }

    /// Minimum RGB image length needed to encode this span
    pub fn rgb_len(&self) -> usize {
        self.rows().end * ROW_RGB_LEN
    }
}

/// Encoded length of `row_count` row packets
pub const fn frame_len(row_count: usize) -> usize {
    row_count * ROW_PACKET_LEN
}

/// Encode the rows of `span` from `rgb` into the start of `dst`.
///
/// Returns the number of bytes written (`span.frame_len()`). Bytes past that
/// point are left untouched.
pub fn encode_rows(dst: &mut [u8], span: RowSpan, rgb: &[u8]) -> Result<usize, FrameError> {
    let needed = span.rgb_len();
    if rgb.len() < needed {
        return Err(FrameError::RgbTooShort {
            expected: needed,
            actual: rgb.len(),
        });
    }
    let len = span.frame_len();
    if dst.len() < len {
        return Err(FrameError::BufferTooSmall {
            needed: len,
            capacity: dst.len(),
        });
    }

    for (packet, row) in dst[..len].chunks_exact_mut(ROW_PACKET_LEN).zip(span.rows()) {
        packet[0] = row as u8;
        packet[1] = 0;
        packet[2] = LAST_COLUMN;

        let src = row * COLUMNS * 3;
        packet[ROW_HEADER_LEN..].copy_from_slice(&rgb[src..src + ROW_RGB_LEN]);
    }

    Ok(len)
}

/// Scratch buffer sized for a full frame, reused across encodes
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    buf: Box<[u8; FRAME_BUFFER_LEN]>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            buf: Box::new([0u8; FRAME_BUFFER_LEN]),
        }
    }

    /// Encode `span` and return exactly the bytes to write
    pub fn encode(&mut self, span: RowSpan, rgb: &[u8]) -> Result<&[u8], FrameError> {
        let len = encode_rows(&mut self.buf[..], span, rgb)?;
        Ok(&self.buf[..len])
    }

    /// Capacity in bytes (always a full frame)
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Row header of an encoded row packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHeader {
    pub row: u8,
    pub start_column: u8,
    pub end_column: u8,
}

/// Decode the row headers of an encoded frame (trailing partial packets are ignored)
pub fn row_headers(frame: &[u8]) -> impl Iterator<Item = RowHeader> + '_ {
    frame.chunks_exact(ROW_PACKET_LEN).map(|packet| RowHeader {
        row: packet[0],
        start_column: packet[1],
        end_column: packet[2],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::matrix::IMAGE_LEN;

    /// Image where every byte encodes its own position
    fn ramp_image() -> Vec<u8> {
        (0..IMAGE_LEN).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_frame_length_for_every_row_count() {
        let rgb = vec![0u8; IMAGE_LEN];
        let mut buffer = FrameBuffer::new();
        for count in 1..=9u8 {
            let span = RowSpan::new(0, count).unwrap();
            let frame = buffer.encode(span, &rgb).unwrap();
            assert_eq!(frame.len(), count as usize * 69);
        }
    }

    #[test]
    fn test_row_headers_and_pixels() {
        let rgb = ramp_image();
        let mut buffer = FrameBuffer::new();
        let frame = buffer.encode(RowSpan::full(), &rgb).unwrap();
        assert_eq!(frame.len(), 621);

        for r in 0..9usize {
            let packet = &frame[r * 69..(r + 1) * 69];
            assert_eq!(&packet[..3], &[r as u8, 0, 21]);
            assert_eq!(&packet[3..], &rgb[3 * r * 22..3 * r * 22 + 66]);
        }
    }

    #[test]
    fn test_all_black_full_frame() {
        let rgb = vec![0u8; 9 * 22 * 3];
        let mut buffer = FrameBuffer::new();
        let frame = buffer.encode(RowSpan::full(), &rgb).unwrap();
        assert_eq!(frame.len(), 621);
        let headers: Vec<_> = row_headers(frame).map(|h| h.row).collect();
        assert_eq!(headers, (0..9).collect::<Vec<u8>>());
    }

    /// Partial updates start at `first_row` and read the image by absolute row.
    #[test]
    fn test_partial_update_uses_absolute_rows() {
        let rgb = ramp_image();
        let mut buffer = FrameBuffer::new();
        let frame = buffer.encode(RowSpan::new(3, 2).unwrap(), &rgb).unwrap();
        assert_eq!(frame.len(), 2 * 69);

        assert_eq!(&frame[..3], &[3, 0, 21]);
        assert_eq!(&frame[3..69], &rgb[3 * 3 * 22..3 * 3 * 22 + 66]);
        assert_eq!(&frame[69..72], &[4, 0, 21]);
        assert_eq!(&frame[72..138], &rgb[3 * 4 * 22..3 * 4 * 22 + 66]);
    }

    #[test]
    fn test_partial_update_needs_image_through_last_row() {
        let span = RowSpan::new(7, 2).unwrap();
        assert_eq!(span.rgb_len(), IMAGE_LEN);

        let mut buffer = FrameBuffer::new();
        let short = vec![0u8; 2 * 66];
        assert_eq!(
            buffer.encode(span, &short).unwrap_err(),
            FrameError::RgbTooShort {
                expected: IMAGE_LEN,
                actual: 132
            }
        );
    }

    #[test]
    fn test_encode_into_short_slice() {
        let rgb = vec![0u8; IMAGE_LEN];
        let mut dst = [0u8; 100];
        assert_eq!(
            encode_rows(&mut dst, RowSpan::new(0, 2).unwrap(), &rgb),
            Err(FrameError::BufferTooSmall {
                needed: 138,
                capacity: 100
            })
        );
        assert_eq!(encode_rows(&mut dst, RowSpan::new(0, 1).unwrap(), &rgb), Ok(69));
    }

    #[test]
    fn test_row_span_bounds() {
        assert!(RowSpan::new(0, 9).is_ok());
        assert!(RowSpan::new(8, 1).is_ok());
        assert_eq!(
            RowSpan::new(0, 0),
            Err(FrameError::RowRange {
                first_row: 0,
                row_count: 0
            })
        );
        assert!(RowSpan::new(5, 5).is_err());
        assert!(RowSpan::new(255, 255).is_err());
    }

    #[test]
    fn test_smaller_encode_leaves_tail_untouched() {
        let mut buffer = FrameBuffer::new();
        let bright = vec![0xFFu8; IMAGE_LEN];
        buffer.encode(RowSpan::full(), &bright).unwrap();

        let dark = vec![0u8; IMAGE_LEN];
        let frame = buffer.encode(RowSpan::new(0, 1).unwrap(), &dark).unwrap();
        assert_eq!(frame.len(), 69);
        assert!(frame[3..].iter().all(|&b| b == 0));

        // Stale row 1 from the earlier encode is still in the scratch buffer
        assert_eq!(buffer.capacity(), FRAME_BUFFER_LEN);
        assert_eq!(buffer.buf[69], 1);
        assert_eq!(buffer.buf[72], 0xFF);
    }
}
