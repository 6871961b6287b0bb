//! # Dense Chunk Hashmaps
//!
//! One handle slot per cell, for tile maps and voxel grids where each cell
//! holds at most one occupant. Chunks appear on first write and every slot
//! starts out as the null handle.
//!
//! Deleting a chunk only drops the index. It does not destroy the entities
//! or their components; that stays with whoever owns the managers.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tessera_core::EntityHandle;

use crate::config::{dense_cell_count, SpatialConfig};
use crate::coord::{ChunkSpace, Coord2D, Coord3D};
use crate::error::SpatialResult;

/// A fixed-size block of cells, one handle per cell.
#[derive(Clone, Debug)]
pub struct GridChunk<P: ChunkSpace> {
    chunk_pos: P,
    chunk_size: i32,
    cells: Box<[EntityHandle]>,
}

impl<P: ChunkSpace> GridChunk<P> {
    /// Creates an empty chunk at chunk coordinate `chunk_pos`.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is not positive or the chunk would exceed
    /// [`MAX_CELLS_PER_CHUNK`](crate::MAX_CELLS_PER_CHUNK) cells.
    #[must_use]
    pub fn new(chunk_pos: P, chunk_size: i32) -> Self {
        match Self::try_new(chunk_pos, chunk_size) {
            Ok(chunk) => chunk,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible twin of [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidChunkSize`](crate::SpatialError::InvalidChunkSize)
    /// for unusable chunk sizes.
    pub fn try_new(chunk_pos: P, chunk_size: i32) -> SpatialResult<Self> {
        let cell_count = dense_cell_count::<P>(chunk_size)?;
        Ok(Self::empty(chunk_pos, chunk_size, cell_count))
    }

    fn empty(chunk_pos: P, chunk_size: i32, cell_count: usize) -> Self {
        Self {
            chunk_pos,
            chunk_size,
            cells: vec![EntityHandle::NULL; cell_count].into_boxed_slice(),
        }
    }

    /// Chunk coordinate of this chunk.
    #[inline]
    #[must_use]
    pub fn chunk_pos(&self) -> P {
        self.chunk_pos
    }

    /// Edge length in cells.
    #[inline]
    #[must_use]
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// World coordinate of the chunk's minimum corner, clamped to the
    /// `i32` range.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> P {
        self.chunk_pos.chunk_origin(self.chunk_size)
    }

    /// True if world coordinate `coord` falls inside this chunk.
    #[inline]
    #[must_use]
    pub fn contains(&self, coord: P) -> bool {
        coord.chunk_of(self.chunk_size) == self.chunk_pos
    }

    /// Handle stored at world coordinate `coord`.
    ///
    /// Null for unset cells and for coordinates outside this chunk.
    #[inline]
    #[must_use]
    pub fn get_obj(&self, coord: P) -> EntityHandle {
        if !self.contains(coord) {
            return EntityHandle::NULL;
        }
        self.cells[coord.local_index(self.chunk_size)]
    }

    /// Stores `handle` at world coordinate `coord`.
    ///
    /// # Returns
    ///
    /// `true` if the cell was written, `false` if `coord` is outside this chunk.
    #[inline]
    pub fn set_obj(&mut self, coord: P, handle: EntityHandle) -> bool {
        if !self.contains(coord) {
            return false;
        }
        self.cells[coord.local_index(self.chunk_size)] = handle;
        true
    }

    /// Iterates over non-null cells as `(world coordinate, handle)`.
    pub fn occupied(&self) -> impl Iterator<Item = (P, EntityHandle)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, handle)| handle.is_valid())
            .filter_map(|(index, &handle)| {
                let cell = self.chunk_pos.cell_at(index, self.chunk_size)?;
                Some((cell, handle))
            })
    }

    /// Number of non-null cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|handle| handle.is_valid()).count()
    }

    /// Raw cell slice, indexed as described in [`crate::coord`].
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[EntityHandle] {
        &self.cells
    }
}

/// Maps chunk coordinates to lazily created dense chunks.
///
/// # Example
///
/// ```rust,ignore
/// let mut map = GridChunkHashmap2D::new(16);
/// map.set_obj((10, 10), e);
/// assert_eq!(map.get_obj((10, 10)), e);
/// assert!(map.get_obj((11, 10)).is_null());
/// ```
#[derive(Clone, Debug)]
pub struct GridChunkHashmap<P: ChunkSpace> {
    chunks: HashMap<P, GridChunk<P>>,
    chunk_size: i32,
    cell_count: usize,
}

impl<P: ChunkSpace> GridChunkHashmap<P> {
    /// Creates an empty map with the given chunk edge length.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is not positive or a chunk would exceed
    /// [`MAX_CELLS_PER_CHUNK`](crate::MAX_CELLS_PER_CHUNK) cells.
    #[must_use]
    pub fn new(chunk_size: i32) -> Self {
        match Self::try_new(chunk_size) {
            Ok(map) => map,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible twin of [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidChunkSize`](crate::SpatialError::InvalidChunkSize)
    /// if `chunk_size` is not positive or a chunk would exceed
    /// [`MAX_CELLS_PER_CHUNK`](crate::MAX_CELLS_PER_CHUNK) cells.
    pub fn try_new(chunk_size: i32) -> SpatialResult<Self> {
        let cell_count = dense_cell_count::<P>(chunk_size)?;
        Ok(Self {
            chunks: HashMap::new(),
            chunk_size,
            cell_count,
        })
    }

    /// Creates an empty map sized from a config section.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured chunk size is unusable.
    pub fn from_config(config: &SpatialConfig) -> SpatialResult<Self> {
        Self::try_new(config.chunk_size)
    }

    /// Edge length of every chunk.
    #[inline]
    #[must_use]
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Number of chunks currently held.
    #[inline]
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Chunk coordinate owning world coordinate `coord`.
    #[inline]
    #[must_use]
    pub fn get_chunk_pos(&self, coord: impl Into<P>) -> P {
        coord.into().chunk_of(self.chunk_size)
    }

    /// The chunk at `chunk_pos`, if it exists.
    #[must_use]
    pub fn get_chunk(&self, chunk_pos: impl Into<P>) -> Option<&GridChunk<P>> {
        self.chunks.get(&chunk_pos.into())
    }

    /// The chunk at `chunk_pos`, mutably.
    pub fn get_chunk_mut(&mut self, chunk_pos: impl Into<P>) -> Option<&mut GridChunk<P>> {
        self.chunks.get_mut(&chunk_pos.into())
    }

    /// Creates an empty chunk at `chunk_pos`, replacing any existing one.
    pub fn create_chunk(&mut self, chunk_pos: impl Into<P>) -> &mut GridChunk<P> {
        let chunk_pos = chunk_pos.into();
        tracing::debug!(chunk = ?chunk_pos, "dense chunk created");
        let chunk = GridChunk::empty(chunk_pos, self.chunk_size, self.cell_count);
        match self.chunks.entry(chunk_pos) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(chunk);
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => vacant.insert(chunk),
        }
    }

    /// Handle stored at world coordinate `coord`.
    ///
    /// Null if the cell was never set or its chunk does not exist.
    #[must_use]
    pub fn get_obj(&self, coord: impl Into<P>) -> EntityHandle {
        let coord = coord.into();
        self.chunks
            .get(&coord.chunk_of(self.chunk_size))
            .map_or(EntityHandle::NULL, |chunk| chunk.get_obj(coord))
    }

    /// Stores `handle` at world coordinate `coord`, creating its chunk if needed.
    pub fn set_obj(&mut self, coord: impl Into<P>, handle: EntityHandle) {
        let coord = coord.into();
        let (chunk_size, cell_count) = (self.chunk_size, self.cell_count);
        let chunk_pos = coord.chunk_of(chunk_size);
        let chunk = self.chunks.entry(chunk_pos).or_insert_with(|| {
            tracing::debug!(chunk = ?chunk_pos, "dense chunk created");
            GridChunk::empty(chunk_pos, chunk_size, cell_count)
        });
        chunk.set_obj(coord, handle);
    }

    /// Resets the cell at `coord` to null. Never creates a chunk.
    ///
    /// Returns the handle that was stored there.
    pub fn clear_obj(&mut self, coord: impl Into<P>) -> EntityHandle {
        let coord = coord.into();
        let Some(chunk) = self.chunks.get_mut(&coord.chunk_of(self.chunk_size)) else {
            return EntityHandle::NULL;
        };
        let previous = chunk.get_obj(coord);
        chunk.set_obj(coord, EntityHandle::NULL);
        previous
    }

    /// Drops the chunk at `chunk_pos` and every handle in it.
    ///
    /// Returns whether a chunk was removed.
    pub fn delete_chunk(&mut self, chunk_pos: impl Into<P>) -> bool {
        let chunk_pos = chunk_pos.into();
        let removed = self.chunks.remove(&chunk_pos).is_some();
        if removed {
            tracing::debug!(chunk = ?chunk_pos, "dense chunk deleted");
        }
        removed
    }

    /// Iterates over every chunk in no particular order.
    pub fn iter_chunks(&self) -> impl Iterator<Item = &GridChunk<P>> {
        self.chunks.values()
    }
}

/// Dense chunk over the 2D grid.
pub type GridChunk2D = GridChunk<Coord2D>;
/// Dense chunk over the 3D grid.
pub type GridChunk3D = GridChunk<Coord3D>;
/// Dense chunk hashmap over the 2D grid.
pub type GridChunkHashmap2D = GridChunkHashmap<Coord2D>;
/// Dense chunk hashmap over the 3D grid.
pub type GridChunkHashmap3D = GridChunkHashmap<Coord3D>;
