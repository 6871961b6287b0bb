//! # Tessera
//!
//! Entity handles, component storage and spatial indexing for worlds,
//! widget trees and anything else that needs stable references to
//! short-lived objects.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐      ┌──────────────────────────────┐
//! │ tessera_core                 │      │ tessera_spatial              │
//! │                              │      │                              │
//! │  • EntityManager  (issues)   │─────>│  • GridChunkHashmap2D / 3D   │
//! │  • ComponentManager (stores) │      │  • FreeChunkHashmap2D / 3D   │
//! │  • PoolAllocator             │      │    (file handles by coord)   │
//! └──────────────────────────────┘      └──────────────────────────────┘
//! ```
//!
//! The entity manager is the only source of truth for handle validity.
//! Component storages and chunk hashmaps just hold handles.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tessera::{TesseraConfig, World, GridChunkHashmap2D};
//!
//! let config = TesseraConfig::load("tessera.toml")?;
//! let mut world = World::new(&config)?;
//! let mut tiles = GridChunkHashmap2D::from_config(&config.spatial)?;
//!
//! let e = world.spawn();
//! tiles.set_obj((10, 10), e);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod world;

pub use config::TesseraConfig;
pub use error::{TesseraError, TesseraResult};
pub use world::World;

pub use tessera_core::{
    ComponentManager, ComponentStorage, CoreError, CoreResult, EntityConfig, EntityHandle,
    EntityManager, ErasedStorage, PoolAllocator, PoolConfig, PoolHandle,
};
pub use tessera_spatial::{
    ChunkSpace, Coord2D, Coord3D, FreeChunk, FreeChunk2D, FreeChunk3D, FreeChunkHashmap,
    FreeChunkHashmap2D, FreeChunkHashmap3D, GridChunk, GridChunk2D, GridChunk3D, GridChunkHashmap,
    GridChunkHashmap2D, GridChunkHashmap3D, SpatialConfig, SpatialError, SpatialResult,
};
