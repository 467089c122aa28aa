//! TileBench - benchmark harness for chunked array-storage layouts
//!
//! TileBench generates synthetic dense 2D arrays, partitions them into
//! fixed-size rectangular chunks, distributes chunk ranges across parallel
//! workers, and issues sequential or randomized access patterns against those
//! chunks through a pluggable storage-engine boundary.
//!
//! # Architecture
//!
//! - **Tiler**: bidirectional mapping between cells, chunk ids, and chunk rectangles
//! - **Partition**: deterministic, coordination-free chunk assignment per worker
//! - **Sampler**: duplicate-free seeded random coordinate generation
//! - **Layout**: row-major chunk buffers with a verifiable synthetic fill pattern
//! - **Engines**: narrow read/write boundary (directory of chunk files, in-memory mock)
//! - **Workers**: per-thread benchmark loops with latency histograms

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod output;
pub mod partition;
pub mod sampler;
pub mod stats;
pub mod tiler;
pub mod worker;

// Re-export commonly used types
pub use error::{Result, TileBenchError};
pub use tiler::{ChunkId, ChunkShape, Domain, Rectangle, Tiling};
