//! Partition planning
//!
//! Divides the ordered sequence of chunk ids into contiguous, equal-sized
//! groups, one per worker, and resolves a group to the bounding rectangle
//! (hyperslab) it covers.
//!
//! # Coordination-free parallelism
//!
//! [`plan_worker`] is a pure function of `(chunk_count, worker_count,
//! worker_index)`. Every worker derives an identical global partition
//! independently, so no inter-worker messaging or locking is needed for the
//! assignment: completeness and disjointness hold by construction.
//!
//! Remainder chunks are a configuration error. The chunk count must divide
//! evenly by the worker count; the planner never falls back to round-robin
//! distribution of leftovers.

use crate::error::{Result, TileBenchError};
use crate::tiler::{ChunkId, Rectangle, Tiling};
use std::fmt;

/// Contiguous half-open range of chunk ids `[first, first + count)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub first: ChunkId,
    pub count: u64,
}

impl ChunkRange {
    pub fn new(first: ChunkId, count: u64) -> Self {
        Self { first, count }
    }

    /// One past the last chunk id in the range
    pub fn end(&self) -> ChunkId {
        self.first + self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn contains(&self, id: ChunkId) -> bool {
        id >= self.first && id < self.end()
    }

    /// Iterate the chunk ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = ChunkId> {
        self.first..self.end()
    }
}

impl fmt::Display for ChunkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.first, self.end())
    }
}

/// Plan the full partition: one contiguous chunk range per worker
///
/// Worker `w` owns `[w * per_worker, (w + 1) * per_worker)` where
/// `per_worker = chunk_count / worker_count`. The returned ranges are
/// disjoint and cover `[0, chunk_count)` exactly once.
///
/// Fails with a configuration error if `worker_count` is zero or does not
/// divide `chunk_count` evenly.
pub fn plan(chunk_count: u64, worker_count: u64) -> Result<Vec<ChunkRange>> {
    let per_worker = chunks_per_worker(chunk_count, worker_count)?;
    Ok((0..worker_count)
        .map(|w| ChunkRange::new(w * per_worker, per_worker))
        .collect())
}

/// Plan the chunk range owned by a single worker
///
/// Pure function of its arguments: every worker calls this with its own
/// `worker_index` and obtains the same global partition without any
/// coordination. Fails with a configuration error on zero or uneven worker
/// counts, or if `worker_index >= worker_count`.
pub fn plan_worker(chunk_count: u64, worker_count: u64, worker_index: u64) -> Result<ChunkRange> {
    let per_worker = chunks_per_worker(chunk_count, worker_count)?;
    if worker_index >= worker_count {
        return Err(TileBenchError::Config(format!(
            "worker index {} outside worker count {}",
            worker_index, worker_count
        )));
    }
    Ok(ChunkRange::new(worker_index * per_worker, per_worker))
}

fn chunks_per_worker(chunk_count: u64, worker_count: u64) -> Result<u64> {
    if worker_count == 0 {
        return Err(TileBenchError::Config(
            "worker count must be greater than 0".to_string(),
        ));
    }
    if chunk_count % worker_count != 0 {
        return Err(TileBenchError::Config(format!(
            "chunk count {} is not divisible by worker count {}",
            chunk_count, worker_count
        )));
    }
    Ok(chunk_count / worker_count)
}

/// Bounding rectangle (hyperslab) covering every chunk in the range
///
/// Merges the rectangles of all chunk ids in the range into one bounding
/// rectangle. For a range spanning multiple rows of the chunk grid, the
/// result is the union bounding box. Fails with a configuration error on an
/// empty range and with an out-of-bounds error if the range exceeds the
/// chunk grid.
pub fn combined_rectangle(tiling: &Tiling, range: &ChunkRange) -> Result<Rectangle> {
    if range.is_empty() {
        return Err(TileBenchError::Config(
            "cannot combine an empty chunk range".to_string(),
        ));
    }
    let mut combined = tiling.rectangle_of(range.first)?;
    for id in range.iter().skip(1) {
        combined = combined.union(&tiling.rectangle_of(id)?);
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiler::{ChunkShape, Domain};

    fn tiling(dim0: u64, dim1: u64, chunk0: u64, chunk1: u64) -> Tiling {
        Tiling::new(Domain::new(dim0, dim1), ChunkShape::new(chunk0, chunk1)).unwrap()
    }

    #[test]
    fn test_plan_even_split() {
        let ranges = plan(100, 4).unwrap();
        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges[0], ChunkRange::new(0, 25));
        assert_eq!(ranges[1], ChunkRange::new(25, 25));
        assert_eq!(ranges[2], ChunkRange::new(50, 25));
        assert_eq!(ranges[3], ChunkRange::new(75, 25));
    }

    #[test]
    fn test_plan_zero_workers_rejected() {
        assert!(matches!(
            plan(100, 0).unwrap_err(),
            TileBenchError::Config(_)
        ));
    }

    #[test]
    fn test_plan_uneven_split_rejected() {
        assert!(matches!(
            plan(100, 3).unwrap_err(),
            TileBenchError::Config(_)
        ));
    }

    #[test]
    fn test_plan_completeness_and_disjointness() {
        for (n, w) in [(100u64, 4u64), (100, 1), (100, 100), (64, 8), (12, 6)] {
            let ranges = plan(n, w).unwrap();
            let mut owned = vec![0u32; n as usize];
            for range in &ranges {
                for id in range.iter() {
                    owned[id as usize] += 1;
                }
            }
            assert!(
                owned.iter().all(|&c| c == 1),
                "partition of {n} chunks over {w} workers is not exact"
            );
        }
    }

    #[test]
    fn test_plan_worker_matches_plan() {
        let ranges = plan(64, 8).unwrap();
        for (w, expected) in ranges.iter().enumerate() {
            assert_eq!(plan_worker(64, 8, w as u64).unwrap(), *expected);
        }
    }

    #[test]
    fn test_plan_worker_index_out_of_range() {
        assert!(matches!(
            plan_worker(64, 8, 8).unwrap_err(),
            TileBenchError::Config(_)
        ));
    }

    #[test]
    fn test_combined_rectangle_single_chunk() {
        let t = tiling(8, 8, 4, 4);
        let rect = combined_rectangle(&t, &ChunkRange::new(3, 1)).unwrap();
        assert_eq!(rect, t.rectangle_of(3).unwrap());
    }

    #[test]
    fn test_combined_rectangle_one_block_row() {
        // Chunks 5..10 are block row 0, block cols 5..9 of a 10x10 chunk grid.
        let t = tiling(100, 100, 10, 10);
        let rect = combined_rectangle(&t, &ChunkRange::new(5, 5)).unwrap();
        assert_eq!(
            rect,
            Rectangle {
                row_lo: 0,
                row_hi: 9,
                col_lo: 50,
                col_hi: 99,
            }
        );
    }

    #[test]
    fn test_combined_rectangle_spanning_block_rows() {
        // Worker 1 of 4 over a 100x100 domain with 10x10 chunks owns ids
        // [25, 50): block rows 2..4, every block column. The union bounding
        // box is full width.
        let t = tiling(100, 100, 10, 10);
        let range = plan_worker(t.chunk_count(), 4, 1).unwrap();
        assert_eq!(range, ChunkRange::new(25, 25));
        let rect = combined_rectangle(&t, &range).unwrap();
        assert_eq!(
            rect,
            Rectangle {
                row_lo: 20,
                row_hi: 49,
                col_lo: 0,
                col_hi: 99,
            }
        );
    }

    #[test]
    fn test_combined_rectangle_covers_every_member() {
        let t = tiling(60, 60, 10, 15);
        for range in plan(t.chunk_count(), 4).unwrap() {
            let combined = combined_rectangle(&t, &range).unwrap();
            for id in range.iter() {
                let rect = t.rectangle_of(id).unwrap();
                assert!(combined.contains(rect.row_lo, rect.col_lo));
                assert!(combined.contains(rect.row_hi, rect.col_hi));
            }
        }
    }

    #[test]
    fn test_combined_rectangle_empty_range_rejected() {
        let t = tiling(8, 8, 4, 4);
        assert!(matches!(
            combined_rectangle(&t, &ChunkRange::new(0, 0)).unwrap_err(),
            TileBenchError::Config(_)
        ));
    }

    #[test]
    fn test_combined_rectangle_out_of_grid_rejected() {
        let t = tiling(8, 8, 4, 4);
        assert!(matches!(
            combined_rectangle(&t, &ChunkRange::new(2, 4)).unwrap_err(),
            TileBenchError::OutOfBounds(_)
        ));
    }
}
