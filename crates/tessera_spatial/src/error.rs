//! # Spatial Error Types

use thiserror::Error;

/// Errors raised when building a chunk hashmap.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpatialError {
    /// Chunk edge length must be strictly positive, and small enough that a
    /// dense chunk stays within the cell cap.
    #[error("invalid chunk size {0}: must be positive and within the per-chunk cell limit")]
    InvalidChunkSize(i32),
}

/// Result type for spatial operations.
pub type SpatialResult<T> = Result<T, SpatialError>;
