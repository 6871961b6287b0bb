//! # Free Chunk Hashmaps
//!
//! Coarse buckets for objects whose positions are not cell-aligned. Each
//! chunk holds a set of handles with no per-cell constraint; a lookup only
//! narrows a neighborhood search down to one chunk.
//!
//! Keeping the sets in sync with object positions is the caller's job.
//! [`FreeChunkHashmap::insert`] and [`FreeChunkHashmap::remove`] are
//! shortcuts for the common case of filing a handle by world coordinate.

use std::collections::BTreeSet;
use std::collections::HashMap;

use tessera_core::EntityHandle;

use crate::config::{validate_chunk_size, SpatialConfig};
use crate::coord::{ChunkSpace, Coord2D, Coord3D};
use crate::error::SpatialResult;

/// A chunk-sized bucket of handles.
#[derive(Clone, Debug)]
pub struct FreeChunk<P: ChunkSpace> {
    chunk_pos: P,
    chunk_size: i32,
    objects: BTreeSet<EntityHandle>,
}

impl<P: ChunkSpace> FreeChunk<P> {
    /// Creates an empty bucket at chunk coordinate `chunk_pos`.
    #[must_use]
    pub fn new(chunk_pos: P, chunk_size: i32) -> Self {
        Self {
            chunk_pos,
            chunk_size,
            objects: BTreeSet::new(),
        }
    }

    /// Chunk coordinate of this bucket.
    #[inline]
    #[must_use]
    pub fn chunk_pos(&self) -> P {
        self.chunk_pos
    }

    /// World coordinate of the chunk's minimum corner, clamped to the
    /// `i32` range.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> P {
        self.chunk_pos.chunk_origin(self.chunk_size)
    }

    /// Handles filed in this bucket, in handle order.
    #[inline]
    #[must_use]
    pub fn objects(&self) -> &BTreeSet<EntityHandle> {
        &self.objects
    }

    /// Mutable access to the handle set.
    #[inline]
    pub fn objects_mut(&mut self) -> &mut BTreeSet<EntityHandle> {
        &mut self.objects
    }

    /// Files `handle` here. Returns `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, handle: EntityHandle) -> bool {
        self.objects.insert(handle)
    }

    /// Unfiles `handle`. Returns whether it was present.
    #[inline]
    pub fn remove(&mut self, handle: EntityHandle) -> bool {
        self.objects.remove(&handle)
    }

    /// True if `handle` is filed here.
    #[inline]
    #[must_use]
    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.objects.contains(&handle)
    }

    /// Number of filed handles.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if nothing is filed here.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Maps chunk coordinates to handle buckets.
///
/// # Example
///
/// ```rust,ignore
/// let mut buckets = FreeChunkHashmap2D::new(32);
/// let chunk = buckets.get_chunk_pos((40, -3));
/// buckets.new_chunk(chunk).insert(e);
/// assert!(buckets.get_chunk_objects(chunk).unwrap().contains(&e));
/// ```
#[derive(Clone, Debug)]
pub struct FreeChunkHashmap<P: ChunkSpace> {
    chunks: HashMap<P, FreeChunk<P>>,
    chunk_size: i32,
}

impl<P: ChunkSpace> FreeChunkHashmap<P> {
    /// Creates an empty map with the given chunk edge length.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is not positive.
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
    /// if `chunk_size` is not positive. Buckets hold no per-cell storage, so
    /// the dense cell cap does not apply.
    pub fn try_new(chunk_size: i32) -> SpatialResult<Self> {
        validate_chunk_size(chunk_size)?;
        Ok(Self {
            chunks: HashMap::new(),
            chunk_size,
        })
    }

    /// Creates an empty map sized from a config section.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured chunk size is not positive.
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

    /// Ensures a bucket exists at `chunk_pos`. An existing bucket is kept
    /// as is.
    pub fn new_chunk(&mut self, chunk_pos: impl Into<P>) -> &mut FreeChunk<P> {
        let chunk_pos = chunk_pos.into();
        let chunk_size = self.chunk_size;
        self.chunks.entry(chunk_pos).or_insert_with(|| {
            tracing::debug!(chunk = ?chunk_pos, "free chunk created");
            FreeChunk::new(chunk_pos, chunk_size)
        })
    }

    /// The bucket at `chunk_pos`, if it exists.
    #[must_use]
    pub fn get_chunk(&self, chunk_pos: impl Into<P>) -> Option<&FreeChunk<P>> {
        self.chunks.get(&chunk_pos.into())
    }

    /// The bucket at `chunk_pos`, mutably.
    pub fn get_chunk_mut(&mut self, chunk_pos: impl Into<P>) -> Option<&mut FreeChunk<P>> {
        self.chunks.get_mut(&chunk_pos.into())
    }

    /// Handles filed at `chunk_pos`, or `None` if there is no such bucket.
    #[must_use]
    pub fn get_chunk_objects(&self, chunk_pos: impl Into<P>) -> Option<&BTreeSet<EntityHandle>> {
        self.get_chunk(chunk_pos).map(FreeChunk::objects)
    }

    /// Mutable handle set at `chunk_pos`.
    pub fn get_chunk_objects_mut(
        &mut self,
        chunk_pos: impl Into<P>,
    ) -> Option<&mut BTreeSet<EntityHandle>> {
        self.get_chunk_mut(chunk_pos).map(FreeChunk::objects_mut)
    }

    /// Drops the bucket at `chunk_pos` and every handle filed in it.
    ///
    /// Returns whether a bucket was removed.
    pub fn delete_chunk(&mut self, chunk_pos: impl Into<P>) -> bool {
        let chunk_pos = chunk_pos.into();
        let removed = self.chunks.remove(&chunk_pos).is_some();
        if removed {
            tracing::debug!(chunk = ?chunk_pos, "free chunk deleted");
        }
        removed
    }

    /// Files `handle` in the bucket owning world coordinate `coord`,
    /// creating the bucket if needed. Returns `false` if already filed there.
    pub fn insert(&mut self, coord: impl Into<P>, handle: EntityHandle) -> bool {
        let chunk_pos = self.get_chunk_pos(coord);
        self.new_chunk(chunk_pos).insert(handle)
    }

    /// Unfiles `handle` from the bucket owning world coordinate `coord`.
    /// Returns whether it was filed there. Empty buckets are kept.
    pub fn remove(&mut self, coord: impl Into<P>, handle: EntityHandle) -> bool {
        let chunk_pos = self.get_chunk_pos(coord);
        self.get_chunk_mut(chunk_pos)
            .is_some_and(|chunk| chunk.remove(handle))
    }

    /// Iterates over every bucket in no particular order.
    pub fn iter_chunks(&self) -> impl Iterator<Item = &FreeChunk<P>> {
        self.chunks.values()
    }
}

/// Free chunk over the 2D grid.
pub type FreeChunk2D = FreeChunk<Coord2D>;
/// Free chunk over the 3D grid.
pub type FreeChunk3D = FreeChunk<Coord3D>;
/// Free chunk hashmap over the 2D grid.
pub type FreeChunkHashmap2D = FreeChunkHashmap<Coord2D>;
/// Free chunk hashmap over the 3D grid.
pub type FreeChunkHashmap3D = FreeChunkHashmap<Coord3D>;
