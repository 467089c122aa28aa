//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod toml;

use crate::engine::EngineKind;
use crate::error::Result as CoreResult;
use crate::tiler::{ChunkShape, Domain, Tiling};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete benchmark configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchConfig {
    pub domain: DomainConfig,
    pub chunk: ChunkConfig,
    #[serde(default)]
    pub workers: WorkersConfig,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Domain extents
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Extent along axis 0 (rows)
    pub dim0: u64,
    /// Extent along axis 1 (columns)
    pub dim1: u64,
}

/// Chunk extents
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Chunk extent along axis 0 (rows)
    pub chunk0: u64,
    /// Chunk extent along axis 1 (columns)
    pub chunk1: u64,
}

/// Worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkersConfig {
    /// Number of worker threads
    #[serde(default = "default_worker_count")]
    pub count: usize,
    /// Base random seed; worker `w` samples with `seed + w`
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_worker_count() -> usize {
    num_cpus::get()
}

fn default_seed() -> u64 {
    42
}

impl Default for WorkersConfig {
    fn default() -> Self {
        Self {
            count: default_worker_count(),
            seed: default_seed(),
        }
    }
}

/// Chunk visit order within a worker's owned range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AccessOrder {
    /// Ascending chunk id order
    Sequential,
    /// Seeded random permutation of the owned range
    Random,
}

impl Default for AccessOrder {
    fn default() -> Self {
        Self::Sequential
    }
}

impl fmt::Display for AccessOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessOrder::Sequential => write!(f, "sequential"),
            AccessOrder::Random => write!(f, "random"),
        }
    }
}

/// Access pattern configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessConfig {
    #[serde(default)]
    pub order: AccessOrder,
}

/// Storage engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub kind: EngineKind,
    /// Target directory for the dir engine
    pub path: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write the run report as JSON to this file
    pub json_output: Option<PathBuf>,
}

impl BenchConfig {
    /// Build the validated tiling for this configuration
    pub fn tiling(&self) -> CoreResult<Tiling> {
        Tiling::new(
            Domain::new(self.domain.dim0, self.domain.dim1),
            ChunkShape::new(self.chunk.chunk0, self.chunk.chunk1),
        )
    }

    /// Validate the complete configuration
    pub fn validate(&self) -> Result<(), String> {
        let tiling = self.tiling().map_err(|e| e.to_string())?;

        crate::partition::plan(tiling.chunk_count(), self.workers.count as u64)
            .map_err(|e| e.to_string())?;

        if self.engine.kind == EngineKind::Dir && self.engine.path.is_none() {
            return Err("the dir engine requires a target path (--path)".to_string());
        }

        Ok(())
    }
}

// Display trait implementations

impl fmt::Display for BenchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(
            f,
            "  Domain: {}x{}, chunks {}x{}",
            self.domain.dim0, self.domain.dim1, self.chunk.chunk0, self.chunk.chunk1
        )?;
        writeln!(
            f,
            "  Workers: {} thread(s), base seed {}",
            self.workers.count, self.workers.seed
        )?;
        writeln!(f, "  Access: {}", self.access.order)?;
        write!(f, "  Engine: {}", self.engine.kind)?;
        if let Some(ref path) = self.engine.path {
            write!(f, " at {}", path.display())?;
        }
        writeln!(f)?;
        if let Some(ref path) = self.output.json_output {
            writeln!(f, "  Output: json={}", path.display())?;
        }
        Ok(())
    }
}
