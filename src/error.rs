//! Error types
//!
//! All fallible operations in the core return [`TileBenchError`]. Configuration
//! and bounds errors are programmer/operator mistakes and abort the invoking
//! driver with a descriptive message; IO failures from the storage boundary are
//! propagated unchanged. Nothing is downgraded to a warning and no operation is
//! partially applied.

use thiserror::Error;

/// Errors produced by the tiling, partitioning, and sampling core
#[derive(Debug, Error)]
pub enum TileBenchError {
    /// Invalid or inconsistent configuration (domain, chunk shape, worker
    /// count, or an oversubscribed unique-sample request)
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Coordinate or chunk id outside the domain
    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    /// Chunk byte buffer does not match the rectangle it claims to cover
    #[error("chunk size mismatch: expected {expected} bytes, got {actual}")]
    ShortChunk { expected: usize, actual: usize },

    /// Malformed record in a coordinate file
    #[error("malformed coordinate record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// IO failure propagated from the storage boundary
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the core modules
pub type Result<T> = std::result::Result<T, TileBenchError>;
