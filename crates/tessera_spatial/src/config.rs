//! # Spatial Configuration
//!
//! The `[spatial]` table of a Tessera config file.

use serde::Deserialize;

use crate::coord::{ChunkSpace, Coord3D};
use crate::error::{SpatialError, SpatialResult};

/// Default chunk edge length, in cells.
pub const DEFAULT_CHUNK_SIZE: i32 = 16;

/// Largest number of cells a dense chunk may hold.
///
/// Caps the edge length at 4096 in 2D and 256 in 3D.
pub const MAX_CELLS_PER_CHUNK: usize = 1 << 24;

/// Chunk sizing shared by dense and free hashmaps.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpatialConfig {
    /// Edge length of every chunk, in cells.
    pub chunk_size: i32,
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SpatialConfig {
    /// Checks that the chunk size is usable by every hashmap kind, 3D dense
    /// chunks included.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidChunkSize`] for zero or negative sizes,
    /// and for sizes whose 3D chunk exceeds [`MAX_CELLS_PER_CHUNK`].
    pub fn validate(&self) -> SpatialResult<()> {
        dense_cell_count::<Coord3D>(self.chunk_size).map(|_| ())
    }
}

pub(crate) fn validate_chunk_size(chunk_size: i32) -> SpatialResult<()> {
    if chunk_size > 0 {
        Ok(())
    } else {
        Err(SpatialError::InvalidChunkSize(chunk_size))
    }
}

/// Cell count of one dense chunk in space `P`, within [`MAX_CELLS_PER_CHUNK`].
pub(crate) fn dense_cell_count<P: ChunkSpace>(chunk_size: i32) -> SpatialResult<usize> {
    match P::cells_per_chunk(chunk_size) {
        Some(cells) if cells <= MAX_CELLS_PER_CHUNK => Ok(cells),
        _ => Err(SpatialError::InvalidChunkSize(chunk_size)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_size_from_toml() {
        let config: SpatialConfig = toml::from_str("chunk_size = 32").unwrap();
        assert_eq!(config.chunk_size, 32);
        assert!(config.validate().is_ok());

        let config: SpatialConfig = toml::from_str("").unwrap();
        assert_eq!(config, SpatialConfig::default());
    }

    #[test]
    fn test_non_positive_sizes_rejected() {
        assert_eq!(
            SpatialConfig { chunk_size: 0 }.validate(),
            Err(SpatialError::InvalidChunkSize(0))
        );
        assert!(SpatialConfig { chunk_size: -4 }.validate().is_err());
    }

    #[test]
    fn test_oversized_chunks_rejected() {
        assert!(SpatialConfig { chunk_size: 256 }.validate().is_ok());
        assert_eq!(
            SpatialConfig { chunk_size: 257 }.validate(),
            Err(SpatialError::InvalidChunkSize(257))
        );
        assert_eq!(
            SpatialConfig {
                chunk_size: 3_000_000
            }
            .validate(),
            Err(SpatialError::InvalidChunkSize(3_000_000))
        );
    }
}
