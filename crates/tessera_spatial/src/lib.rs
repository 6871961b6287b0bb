//! # Tessera Spatial
//!
//! Grid-based spatial hashmaps that file entity handles by integer
//! position.
//!
//! ## Core Components
//!
//! - `Coord2D` / `Coord3D`: world and chunk coordinates, `ChunkSpace` trait
//! - `GridChunkHashmap2D` / `3D`: one handle per cell, chunks created on write
//! - `FreeChunkHashmap2D` / `3D`: a handle set per chunk for free-moving objects
//!
//! ## Example
//!
//! ```rust,ignore
//! use tessera_spatial::GridChunkHashmap2D;
//!
//! let mut tiles = GridChunkHashmap2D::new(16);
//! tiles.set_obj((10, 10), e);
//! assert_eq!(tiles.get_obj((10, 10)), e);
//! assert!(tiles.get_obj((11, 10)).is_null());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod coord;
pub mod error;
pub mod free;
pub mod grid;

pub use config::{SpatialConfig, DEFAULT_CHUNK_SIZE, MAX_CELLS_PER_CHUNK};
pub use coord::{ChunkSpace, Coord2D, Coord3D};
pub use error::{SpatialError, SpatialResult};
pub use free::{
    FreeChunk, FreeChunk2D, FreeChunk3D, FreeChunkHashmap, FreeChunkHashmap2D, FreeChunkHashmap3D,
};
pub use grid::{
    GridChunk, GridChunk2D, GridChunk3D, GridChunkHashmap, GridChunkHashmap2D, GridChunkHashmap3D,
};
