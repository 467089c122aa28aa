//! Chunk buffer layout
//!
//! Linearizes a rectangular chunk of cell values into a flat row-major `i32`
//! buffer and back, and fills a chunk with the canonical verifiable synthetic
//! pattern `value(r, c) = r * dim1 + c`. The pattern uses the *global* domain
//! width, not the chunk width, so every generator/consumer pair in the suite
//! agrees on the expected value of any cell regardless of which chunk holds it.
//!
//! # Chunk byte format
//!
//! One chunk is exactly `cell_count * 4` bytes of row-major little-endian
//! `i32` values, no header. A byte slice of any other length is rejected on
//! decode.

use crate::error::{Result, TileBenchError};
use crate::tiler::{Domain, Rectangle};

/// Bytes per cell value in the chunk byte format
pub const CELL_BYTES: usize = 4;

/// Row-major offset of a cell within a rectangle's flat buffer
///
/// `offset = (row - row_lo) * width + (col - col_lo)`. Fails with an
/// out-of-bounds error if the cell lies outside the rectangle.
pub fn linear_index(rect: &Rectangle, row: u64, col: u64) -> Result<usize> {
    if !rect.contains(row, col) {
        return Err(TileBenchError::OutOfBounds(format!(
            "cell ({}, {}) outside rectangle {}",
            row, col, rect
        )));
    }
    Ok(((row - rect.row_lo) * rect.width() + (col - rect.col_lo)) as usize)
}

/// Expected synthetic value of one cell under the canonical fill pattern
#[inline]
pub fn synthetic_value(domain: &Domain, row: u64, col: u64) -> i32 {
    (row * domain.dim1 + col) as i32
}

/// Owned row-major buffer of cell values for one rectangle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkBuffer {
    rect: Rectangle,
    values: Vec<i32>,
}

impl ChunkBuffer {
    /// Materialize the synthetic fill pattern for a rectangle
    pub fn fill_synthetic(domain: &Domain, rect: &Rectangle) -> Self {
        let mut values = Vec::with_capacity(rect.cell_count() as usize);
        for row in rect.row_lo..=rect.row_hi {
            for col in rect.col_lo..=rect.col_hi {
                values.push(synthetic_value(domain, row, col));
            }
        }
        Self {
            rect: *rect,
            values,
        }
    }

    /// Wrap an existing value buffer, checking its length against the rectangle
    pub fn from_values(rect: &Rectangle, values: Vec<i32>) -> Result<Self> {
        let expected = rect.cell_count() as usize;
        if values.len() != expected {
            return Err(TileBenchError::ShortChunk {
                expected: expected * CELL_BYTES,
                actual: values.len() * CELL_BYTES,
            });
        }
        Ok(Self {
            rect: *rect,
            values,
        })
    }

    /// Decode a raw little-endian byte buffer for a rectangle
    ///
    /// The slice must be exactly `cell_count * 4` bytes; a short (or
    /// oversized) slice is reported as a transfer error, never silently
    /// padded or truncated.
    pub fn from_bytes(rect: &Rectangle, bytes: &[u8]) -> Result<Self> {
        let expected = rect.cell_count() as usize * CELL_BYTES;
        if bytes.len() != expected {
            return Err(TileBenchError::ShortChunk {
                expected,
                actual: bytes.len(),
            });
        }
        let values = bytes
            .chunks_exact(CELL_BYTES)
            .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        Ok(Self {
            rect: *rect,
            values,
        })
    }

    /// Encode as raw little-endian bytes, `cell_count * 4` long, no header
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.values.len() * CELL_BYTES);
        for value in &self.values {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    pub fn rect(&self) -> &Rectangle {
        &self.rect
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn into_values(self) -> Vec<i32> {
        self.values
    }

    /// Size of the encoded chunk in bytes
    pub fn byte_len(&self) -> usize {
        self.values.len() * CELL_BYTES
    }

    /// Value at a global cell coordinate
    pub fn get(&self, row: u64, col: u64) -> Result<i32> {
        Ok(self.values[linear_index(&self.rect, row, col)?])
    }

    /// Whether every cell matches the synthetic fill pattern
    pub fn verify(&self, domain: &Domain) -> bool {
        self.first_mismatch(domain).is_none()
    }

    /// First cell deviating from the synthetic pattern, if any
    ///
    /// Returns `(row, col, expected, actual)` for the first mismatch in
    /// row-major order; drivers report it verbatim on a failed verify pass.
    pub fn first_mismatch(&self, domain: &Domain) -> Option<(u64, u64, i32, i32)> {
        let mut idx = 0;
        for row in self.rect.row_lo..=self.rect.row_hi {
            for col in self.rect.col_lo..=self.rect.col_hi {
                let expected = synthetic_value(domain, row, col);
                let actual = self.values[idx];
                if actual != expected {
                    return Some((row, col, expected, actual));
                }
                idx += 1;
            }
        }
        None
    }
}

/// Verify a flat value buffer against the synthetic pattern for a rectangle
pub fn verify(domain: &Domain, rect: &Rectangle, values: &[i32]) -> bool {
    match ChunkBuffer::from_values(rect, values.to_vec()) {
        Ok(buf) => buf.verify(domain),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiler::{ChunkShape, Tiling};

    fn rect(row_lo: u64, row_hi: u64, col_lo: u64, col_hi: u64) -> Rectangle {
        Rectangle {
            row_lo,
            row_hi,
            col_lo,
            col_hi,
        }
    }

    #[test]
    fn test_linear_index() {
        let r = rect(4, 7, 4, 7);
        assert_eq!(linear_index(&r, 4, 4).unwrap(), 0);
        assert_eq!(linear_index(&r, 4, 7).unwrap(), 3);
        assert_eq!(linear_index(&r, 5, 4).unwrap(), 4);
        assert_eq!(linear_index(&r, 7, 7).unwrap(), 15);
    }

    #[test]
    fn test_linear_index_out_of_bounds() {
        let r = rect(4, 7, 4, 7);
        assert!(matches!(
            linear_index(&r, 3, 4).unwrap_err(),
            TileBenchError::OutOfBounds(_)
        ));
        assert!(matches!(
            linear_index(&r, 4, 8).unwrap_err(),
            TileBenchError::OutOfBounds(_)
        ));
    }

    #[test]
    fn test_fill_synthetic_uses_global_width() {
        // Domain (8, 8), chunk (4, 4), chunk id 3 covers [4..7, 4..7].
        // The value at global (4, 4) is 4 * 8 + 4 = 36, not 0.
        let domain = Domain::new(8, 8);
        let tiling = Tiling::new(domain, ChunkShape::new(4, 4)).unwrap();
        let r = tiling.rectangle_of(3).unwrap();
        let buf = ChunkBuffer::fill_synthetic(&domain, &r);
        assert_eq!(buf.values()[0], 36);
        assert_eq!(buf.get(4, 4).unwrap(), 36);
        assert_eq!(buf.get(7, 7).unwrap(), 63);
    }

    #[test]
    fn test_verify_round_trip_every_chunk() {
        let domain = Domain::new(12, 20);
        let tiling = Tiling::new(domain, ChunkShape::new(3, 5)).unwrap();
        for id in 0..tiling.chunk_count() {
            let r = tiling.rectangle_of(id).unwrap();
            let buf = ChunkBuffer::fill_synthetic(&domain, &r);
            assert!(buf.verify(&domain), "chunk {id} failed verification");
        }
    }

    #[test]
    fn test_first_mismatch_reported() {
        let domain = Domain::new(8, 8);
        let r = rect(4, 7, 4, 7);
        let mut values = ChunkBuffer::fill_synthetic(&domain, &r).into_values();
        values[5] = -1;
        let buf = ChunkBuffer::from_values(&r, values).unwrap();
        // Index 5 is local (1, 1), global (5, 5), expected 5 * 8 + 5 = 45.
        assert_eq!(buf.first_mismatch(&domain), Some((5, 5, 45, -1)));
        assert!(!buf.verify(&domain));
    }

    #[test]
    fn test_byte_round_trip() {
        let domain = Domain::new(8, 8);
        let r = rect(0, 3, 4, 7);
        let buf = ChunkBuffer::fill_synthetic(&domain, &r);
        let bytes = buf.to_bytes();
        assert_eq!(bytes.len(), 16 * CELL_BYTES);
        let decoded = ChunkBuffer::from_bytes(&r, &bytes).unwrap();
        assert_eq!(decoded, buf);
    }

    #[test]
    fn test_from_bytes_rejects_wrong_size() {
        let r = rect(0, 3, 0, 3);
        let err = ChunkBuffer::from_bytes(&r, &[0u8; 63]).unwrap_err();
        match err {
            TileBenchError::ShortChunk { expected, actual } => {
                assert_eq!(expected, 64);
                assert_eq!(actual, 63);
            }
            other => panic!("expected ShortChunk, got {other:?}"),
        }
    }

    #[test]
    fn test_from_values_rejects_wrong_length() {
        let r = rect(0, 3, 0, 3);
        assert!(ChunkBuffer::from_values(&r, vec![0; 15]).is_err());
        assert!(ChunkBuffer::from_values(&r, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_verify_helper_rejects_wrong_length() {
        let domain = Domain::new(8, 8);
        let r = rect(0, 3, 0, 3);
        assert!(!verify(&domain, &r, &[0; 15]));
    }
}
