//! Domain tiling
//!
//! This module provides the bidirectional mapping between cell coordinates,
//! chunk ids, and chunk rectangles for a 2D domain divided evenly into
//! fixed-size chunks. It is the one shared primitive of the crate: the
//! partition planner, the coordinate sampler, and the benchmark drivers all
//! resolve chunk geometry through [`Tiling`] rather than deriving index
//! arithmetic inline.
//!
//! # Chunk id ordering
//!
//! Chunk ids are assigned in row-major order over the chunk grid. With
//! `chunks_per_row = dim1 / chunk1`, a chunk's block coordinates are
//! `(id / chunks_per_row, id % chunks_per_row)`.
//!
//! # Example
//!
//! ```
//! use tilebench::tiler::{ChunkShape, Domain, Tiling};
//!
//! let tiling = Tiling::new(Domain::new(8, 8), ChunkShape::new(4, 4)).unwrap();
//! assert_eq!(tiling.chunk_count(), 4);
//!
//! let rect = tiling.rectangle_of(3).unwrap();
//! assert_eq!((rect.row_lo, rect.row_hi, rect.col_lo, rect.col_hi), (4, 7, 4, 7));
//! assert_eq!(tiling.chunk_id_of(5, 6).unwrap(), 3);
//! ```

use crate::error::{Result, TileBenchError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Row-major linear index identifying one chunk within the chunk grid
pub type ChunkId = u64;

/// Full 2D extent of the array under benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Extent along axis 0 (rows)
    pub dim0: u64,
    /// Extent along axis 1 (columns)
    pub dim1: u64,
}

impl Domain {
    pub fn new(dim0: u64, dim1: u64) -> Self {
        Self { dim0, dim1 }
    }

    /// Total number of cells in the domain
    pub fn cell_count(&self) -> u64 {
        self.dim0 * self.dim1
    }

    /// Whether the cell lies inside the domain
    pub fn contains(&self, row: u64, col: u64) -> bool {
        row < self.dim0 && col < self.dim1
    }

    /// Rectangle covering the whole domain
    ///
    /// Requires a non-empty domain; callers go through [`Tiling::new`] which
    /// rejects zero extents.
    pub fn bounding_rectangle(&self) -> Rectangle {
        Rectangle {
            row_lo: 0,
            row_hi: self.dim0.saturating_sub(1),
            col_lo: 0,
            col_hi: self.dim1.saturating_sub(1),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.dim0, self.dim1)
    }
}

/// Extent of one chunk along each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkShape {
    /// Chunk extent along axis 0 (rows)
    pub chunk0: u64,
    /// Chunk extent along axis 1 (columns)
    pub chunk1: u64,
}

impl ChunkShape {
    pub fn new(chunk0: u64, chunk1: u64) -> Self {
        Self { chunk0, chunk1 }
    }

    /// Number of cells in one chunk
    pub fn cell_count(&self) -> u64 {
        self.chunk0 * self.chunk1
    }
}

impl fmt::Display for ChunkShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.chunk0, self.chunk1)
    }
}

/// Rectangular sub-range of a domain with inclusive bounds
///
/// Always non-empty: `row_lo <= row_hi` and `col_lo <= col_hi`. Rectangles
/// produced by [`Tiling`] are always fully contained in the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub row_lo: u64,
    pub row_hi: u64,
    pub col_lo: u64,
    pub col_hi: u64,
}

impl Rectangle {
    /// Number of rows covered
    pub fn height(&self) -> u64 {
        self.row_hi - self.row_lo + 1
    }

    /// Number of columns covered
    pub fn width(&self) -> u64 {
        self.col_hi - self.col_lo + 1
    }

    /// Number of cells covered
    pub fn cell_count(&self) -> u64 {
        self.height() * self.width()
    }

    /// Whether the cell lies inside the rectangle
    pub fn contains(&self, row: u64, col: u64) -> bool {
        row >= self.row_lo && row <= self.row_hi && col >= self.col_lo && col <= self.col_hi
    }

    /// Smallest rectangle covering both `self` and `other`
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle {
            row_lo: self.row_lo.min(other.row_lo),
            row_hi: self.row_hi.max(other.row_hi),
            col_lo: self.col_lo.min(other.col_lo),
            col_hi: self.col_hi.max(other.col_hi),
        }
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..{}, {}..{}]",
            self.row_lo, self.row_hi, self.col_lo, self.col_hi
        )
    }
}

/// Validated pairing of a domain and a chunk shape
///
/// Construction fails with a configuration error if any extent is zero or if
/// either domain axis is not evenly divisible by the corresponding chunk
/// extent. Uneven division is never silently truncated: a partial trailing
/// chunk would produce incorrect hyperslabs downstream, so it is rejected up
/// front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tiling {
    domain: Domain,
    shape: ChunkShape,
}

impl Tiling {
    /// Create a tiling, validating divisibility and non-zero extents
    pub fn new(domain: Domain, shape: ChunkShape) -> Result<Self> {
        if domain.dim0 == 0 || domain.dim1 == 0 {
            return Err(TileBenchError::Config(format!(
                "domain extents must be positive, got {}",
                domain
            )));
        }
        if shape.chunk0 == 0 || shape.chunk1 == 0 {
            return Err(TileBenchError::Config(format!(
                "chunk extents must be positive, got {}",
                shape
            )));
        }
        if domain.dim0 % shape.chunk0 != 0 {
            return Err(TileBenchError::Config(format!(
                "domain dim0 ({}) is not divisible by chunk0 ({})",
                domain.dim0, shape.chunk0
            )));
        }
        if domain.dim1 % shape.chunk1 != 0 {
            return Err(TileBenchError::Config(format!(
                "domain dim1 ({}) is not divisible by chunk1 ({})",
                domain.dim1, shape.chunk1
            )));
        }
        Ok(Self { domain, shape })
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn shape(&self) -> ChunkShape {
        self.shape
    }

    /// Number of chunks along axis 1 (one row of the chunk grid)
    pub fn chunks_per_row(&self) -> u64 {
        self.domain.dim1 / self.shape.chunk1
    }

    /// Number of chunks along axis 0 (one column of the chunk grid)
    pub fn chunks_per_col(&self) -> u64 {
        self.domain.dim0 / self.shape.chunk0
    }

    /// Total number of chunks in the domain
    pub fn chunk_count(&self) -> u64 {
        self.chunks_per_row() * self.chunks_per_col()
    }

    /// Chunk id of the chunk containing the given cell
    ///
    /// Fails with an out-of-bounds error if the cell lies outside the domain.
    pub fn chunk_id_of(&self, row: u64, col: u64) -> Result<ChunkId> {
        if !self.domain.contains(row, col) {
            return Err(TileBenchError::OutOfBounds(format!(
                "cell ({}, {}) outside domain {}",
                row, col, self.domain
            )));
        }
        let block_row = row / self.shape.chunk0;
        let block_col = col / self.shape.chunk1;
        Ok(block_row * self.chunks_per_row() + block_col)
    }

    /// Rectangular extent of the chunk with the given id
    ///
    /// Inverse of [`chunk_id_of`](Self::chunk_id_of): every cell of the
    /// returned rectangle maps back to `id`.
    pub fn rectangle_of(&self, id: ChunkId) -> Result<Rectangle> {
        if id >= self.chunk_count() {
            return Err(TileBenchError::OutOfBounds(format!(
                "chunk id {} outside chunk grid of {} chunks",
                id,
                self.chunk_count()
            )));
        }
        let block_row = id / self.chunks_per_row();
        let block_col = id % self.chunks_per_row();
        let row_lo = block_row * self.shape.chunk0;
        let col_lo = block_col * self.shape.chunk1;
        Ok(Rectangle {
            row_lo,
            row_hi: row_lo + self.shape.chunk0 - 1,
            col_lo,
            col_hi: col_lo + self.shape.chunk1 - 1,
        })
    }
}

impl fmt::Display for Tiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "domain {} in {} chunks of {}",
            self.domain,
            self.chunk_count(),
            self.shape
        )
    }
}
