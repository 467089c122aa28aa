//! Storage engine abstraction
//!
//! The core never performs storage IO itself; it only computes where data
//! belongs and which coordinates to touch. This module defines the narrow
//! boundary it hands work across: a rectangle (offset + count per axis) plus
//! a flat buffer in, a flat buffer out. Real array stores sit behind this
//! trait; the crate ships a directory-of-chunk-files engine and an in-memory
//! mock for tests.
//!
//! # Error handling
//!
//! Engines report any non-success as an IO failure for the caller to
//! propagate. Short reads and writes are never padded or truncated silently.

use crate::error::{Result, TileBenchError};
use crate::tiler::{Rectangle, Tiling};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub mod dir;
pub mod mock;

/// Read/write boundary to an external array store
///
/// Engines must be `Send` so each worker thread can own its own instance;
/// they are not required to be `Sync` and workers never share one.
pub trait ArrayEngine: Send + fmt::Debug {
    /// Write a flat row-major value buffer covering the rectangle
    fn write(&mut self, rect: &Rectangle, values: &[i32]) -> Result<()>;

    /// Read back the flat row-major value buffer covering the rectangle
    fn read(&mut self, rect: &Rectangle) -> Result<Vec<i32>>;
}

/// Selectable engine implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// One raw binary file per chunk under a directory
    Dir,
    /// In-memory store, for tests and dry measurement of the core
    Mock,
}

impl Default for EngineKind {
    fn default() -> Self {
        Self::Dir
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Dir => write!(f, "dir"),
            EngineKind::Mock => write!(f, "mock"),
        }
    }
}

/// Construct an engine instance for one worker
///
/// The `dir` engine requires a target path; omitting it is a configuration
/// error. Each worker calls this independently so engines never share state.
pub fn create_engine(
    kind: EngineKind,
    tiling: &Tiling,
    path: Option<&Path>,
) -> Result<Box<dyn ArrayEngine>> {
    match kind {
        EngineKind::Dir => {
            let path = path.ok_or_else(|| {
                TileBenchError::Config("the dir engine requires a target path".to_string())
            })?;
            Ok(Box::new(dir::DirEngine::new(*tiling, path)?))
        }
        EngineKind::Mock => Ok(Box::new(mock::MockEngine::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiler::{ChunkShape, Domain};

    #[test]
    fn test_create_dir_engine_requires_path() {
        let tiling = Tiling::new(Domain::new(8, 8), ChunkShape::new(4, 4)).unwrap();
        assert!(matches!(
            create_engine(EngineKind::Dir, &tiling, None).unwrap_err(),
            TileBenchError::Config(_)
        ));
    }

    #[test]
    fn test_create_mock_engine() {
        let tiling = Tiling::new(Domain::new(8, 8), ChunkShape::new(4, 4)).unwrap();
        assert!(create_engine(EngineKind::Mock, &tiling, None).is_ok());
    }
}
