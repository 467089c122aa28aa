//! CLI argument parsing using clap

use super::AccessOrder;
use crate::engine::EngineKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TileBench - benchmark harness for chunked array-storage layouts
#[derive(Parser, Debug)]
#[command(name = "tilebench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file; command-line flags override its values
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Domain extent along axis 0 (rows)
    #[arg(long, global = true)]
    pub dim0: Option<u64>,

    /// Domain extent along axis 1 (columns)
    #[arg(long, global = true)]
    pub dim1: Option<u64>,

    /// Chunk extent along axis 0 (rows)
    #[arg(long, global = true)]
    pub chunk0: Option<u64>,

    /// Chunk extent along axis 1 (columns)
    #[arg(long, global = true)]
    pub chunk1: Option<u64>,

    /// Number of worker threads (default: available CPUs)
    #[arg(short = 'w', long, global = true)]
    pub workers: Option<usize>,

    /// Base random seed; worker w samples with seed + w
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Chunk visit order within each worker's owned range
    #[arg(long, global = true, value_enum)]
    pub access: Option<AccessOrder>,

    /// Storage engine implementation
    #[arg(long, global = true, value_enum)]
    pub engine: Option<EngineKind>,

    /// Target directory for the dir engine
    #[arg(long, global = true)]
    pub path: Option<PathBuf>,

    /// Write the run report as JSON to this file
    #[arg(long, global = true)]
    pub json_output: Option<PathBuf>,
}

/// Benchmark subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Populate every owned chunk with the synthetic fill pattern
    Write,

    /// Read every owned chunk back through the engine
    Read {
        /// Recompute the synthetic pattern per chunk and compare
        #[arg(long)]
        verify: bool,
    },

    /// Draw unique random coordinates and write them to a coordinate file
    Sample {
        /// Number of distinct coordinates to draw
        #[arg(short = 'n', long)]
        count: u64,

        /// Tag each coordinate with the tile (chunk) id it falls in
        #[arg(long)]
        with_tile_ids: bool,

        /// Output file: one `tile_id row col` (or `row col`) record per line
        #[arg(short = 'o', long)]
        out: PathBuf,
    },

    /// Print the per-worker partition table and exit
    Plan,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
