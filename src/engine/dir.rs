//! Directory-of-chunk-files engine
//!
//! Stores one file per chunk under a target directory: raw binary, row-major
//! little-endian `i32` values, exactly `chunk0 * chunk1 * 4` bytes, no
//! header. File names encode the chunk id, so any worker can address any
//! chunk without a catalog.
//!
//! Requests must cover exactly one chunk rectangle; this engine is the unit
//! of IO for whole-chunk benchmarks, not a general hyperslab store.

use super::ArrayEngine;
use crate::error::{Result, TileBenchError};
use crate::layout::{ChunkBuffer, CELL_BYTES};
use crate::tiler::{ChunkId, Rectangle, Tiling};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Engine writing each chunk to its own raw binary file
#[derive(Debug)]
pub struct DirEngine {
    tiling: Tiling,
    dir: PathBuf,
}

impl DirEngine {
    /// Create the engine, creating the target directory if needed
    pub fn new(tiling: Tiling, dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            tiling,
            dir: dir.to_path_buf(),
        })
    }

    /// Path of the file backing one chunk
    pub fn chunk_path(&self, id: ChunkId) -> PathBuf {
        self.dir.join(format!("chunk_{:08}.bin", id))
    }

    /// Resolve a request rectangle to the chunk it must cover exactly
    fn chunk_id_for(&self, rect: &Rectangle) -> Result<ChunkId> {
        let id = self.tiling.chunk_id_of(rect.row_lo, rect.col_lo)?;
        let chunk_rect = self.tiling.rectangle_of(id)?;
        if *rect != chunk_rect {
            return Err(TileBenchError::Config(format!(
                "dir engine operates on whole chunks: {} is not chunk {} ({})",
                rect, id, chunk_rect
            )));
        }
        Ok(id)
    }
}

impl ArrayEngine for DirEngine {
    fn write(&mut self, rect: &Rectangle, values: &[i32]) -> Result<()> {
        let id = self.chunk_id_for(rect)?;
        let buf = ChunkBuffer::from_values(rect, values.to_vec())?;
        let mut file = File::create(self.chunk_path(id))?;
        file.write_all(&buf.to_bytes())?;
        Ok(())
    }

    fn read(&mut self, rect: &Rectangle) -> Result<Vec<i32>> {
        let id = self.chunk_id_for(rect)?;
        let expected = rect.cell_count() as usize * CELL_BYTES;
        let mut bytes = Vec::with_capacity(expected);
        File::open(self.chunk_path(id))?.read_to_end(&mut bytes)?;
        // from_bytes rejects short or oversized files
        Ok(ChunkBuffer::from_bytes(rect, &bytes)?.into_values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;
    use crate::tiler::{ChunkShape, Domain};
    use tempfile::tempdir;

    fn tiling() -> Tiling {
        Tiling::new(Domain::new(8, 8), ChunkShape::new(4, 4)).unwrap()
    }

    #[test]
    fn test_write_read_round_trip() {
        let dir = tempdir().unwrap();
        let t = tiling();
        let mut engine = DirEngine::new(t, dir.path()).unwrap();

        let domain = t.domain();
        for id in 0..t.chunk_count() {
            let rect = t.rectangle_of(id).unwrap();
            let buf = ChunkBuffer::fill_synthetic(&domain, &rect);
            engine.write(&rect, buf.values()).unwrap();
        }
        for id in 0..t.chunk_count() {
            let rect = t.rectangle_of(id).unwrap();
            let values = engine.read(&rect).unwrap();
            assert!(layout::verify(&domain, &rect, &values));
        }
    }

    #[test]
    fn test_chunk_file_size_exact() {
        let dir = tempdir().unwrap();
        let t = tiling();
        let mut engine = DirEngine::new(t, dir.path()).unwrap();
        let rect = t.rectangle_of(0).unwrap();
        let buf = ChunkBuffer::fill_synthetic(&t.domain(), &rect);
        engine.write(&rect, buf.values()).unwrap();

        let meta = std::fs::metadata(engine.chunk_path(0)).unwrap();
        assert_eq!(meta.len(), 4 * 4 * CELL_BYTES as u64);
    }

    #[test]
    fn test_read_missing_chunk_is_io_failure() {
        let dir = tempdir().unwrap();
        let t = tiling();
        let mut engine = DirEngine::new(t, dir.path()).unwrap();
        let rect = t.rectangle_of(0).unwrap();
        assert!(matches!(
            engine.read(&rect).unwrap_err(),
            TileBenchError::Io(_)
        ));
    }

    #[test]
    fn test_read_truncated_chunk_rejected() {
        let dir = tempdir().unwrap();
        let t = tiling();
        let mut engine = DirEngine::new(t, dir.path()).unwrap();
        let rect = t.rectangle_of(0).unwrap();
        std::fs::write(engine.chunk_path(0), [0u8; 10]).unwrap();
        assert!(matches!(
            engine.read(&rect).unwrap_err(),
            TileBenchError::ShortChunk { .. }
        ));
    }

    #[test]
    fn test_partial_chunk_rectangle_rejected() {
        let dir = tempdir().unwrap();
        let t = tiling();
        let mut engine = DirEngine::new(t, dir.path()).unwrap();
        let partial = Rectangle {
            row_lo: 0,
            row_hi: 1,
            col_lo: 0,
            col_hi: 1,
        };
        assert!(matches!(
            engine.write(&partial, &[0; 4]).unwrap_err(),
            TileBenchError::Config(_)
        ));
    }

    #[test]
    fn test_write_wrong_buffer_length_rejected() {
        let dir = tempdir().unwrap();
        let t = tiling();
        let mut engine = DirEngine::new(t, dir.path()).unwrap();
        let rect = t.rectangle_of(0).unwrap();
        assert!(matches!(
            engine.write(&rect, &[0; 15]).unwrap_err(),
            TileBenchError::ShortChunk { .. }
        ));
    }
}
