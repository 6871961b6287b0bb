//! # Chunk Coordinates
//!
//! World space is integer cells. A chunk is a `chunk_size`-wide square (2D)
//! or cube (3D) of cells, addressed by its chunk coordinate:
//!
//! ```text
//! chunk = floor(world / chunk_size)      per axis, any sign
//! local = world - chunk * chunk_size     always in [0, chunk_size)
//! index = lx + ly * size (+ lz * size^2)
//! ```
//!
//! Floor division keeps `-1` in chunk `-1`, not chunk `0`.
//!
//! Chunks on the edge of the `i32` range may reach past it. Their origin is
//! clamped to the first representable cell, and [`ChunkSpace::cell_at`]
//! returns `None` for the cells that do not exist.

// Local offsets are in [0, chunk_size) and chunk_size is a positive i32.
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]

use std::fmt;
use std::hash::Hash;

use bytemuck::{Pod, Zeroable};

/// A coordinate space that can be cut into chunks.
///
/// Implemented by [`Coord2D`] and [`Coord3D`]; the same type is used for
/// world coordinates and for chunk coordinates.
pub trait ChunkSpace: Copy + Eq + Ord + Hash + fmt::Debug + 'static {
    /// Number of cells in one chunk of the given edge length.
    ///
    /// `None` if `chunk_size` is not positive or the count overflows `usize`.
    fn cells_per_chunk(chunk_size: i32) -> Option<usize>;

    /// Chunk containing this world coordinate.
    #[must_use]
    fn chunk_of(self, chunk_size: i32) -> Self;

    /// World coordinate of the minimum corner of the chunk at `self`,
    /// clamped per axis to the `i32` range.
    #[must_use]
    fn chunk_origin(self, chunk_size: i32) -> Self;

    /// Flat index of this world coordinate's cell within its own chunk.
    fn local_index(self, chunk_size: i32) -> usize;

    /// World coordinate of cell `index` in the chunk at `self`, or `None`
    /// if that cell lies outside the `i32` range.
    fn cell_at(self, index: usize, chunk_size: i32) -> Option<Self>;
}

#[inline]
fn extent(chunk_size: i32) -> usize {
    chunk_size.max(0) as usize
}

#[inline]
fn positive_extent(chunk_size: i32) -> Option<usize> {
    usize::try_from(chunk_size).ok().filter(|&size| size > 0)
}

#[inline]
fn axis_origin(chunk: i32, chunk_size: i32) -> i32 {
    let origin = i64::from(chunk) * i64::from(chunk_size);
    origin.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[inline]
fn axis_cell(chunk: i32, chunk_size: i32, offset: usize) -> Option<i32> {
    i32::try_from(i64::from(chunk) * i64::from(chunk_size) + offset as i64).ok()
}

/// A point on the 2D integer grid, or a 2D chunk key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Coord2D {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl Coord2D {
    /// Creates a new coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl ChunkSpace for Coord2D {
    #[inline]
    fn cells_per_chunk(chunk_size: i32) -> Option<usize> {
        positive_extent(chunk_size)?.checked_pow(2)
    }

    #[inline]
    fn chunk_of(self, chunk_size: i32) -> Self {
        Self::new(self.x.div_euclid(chunk_size), self.y.div_euclid(chunk_size))
    }

    #[inline]
    fn chunk_origin(self, chunk_size: i32) -> Self {
        Self::new(
            axis_origin(self.x, chunk_size),
            axis_origin(self.y, chunk_size),
        )
    }

    #[inline]
    fn local_index(self, chunk_size: i32) -> usize {
        let lx = self.x.rem_euclid(chunk_size) as usize;
        let ly = self.y.rem_euclid(chunk_size) as usize;
        lx + ly * extent(chunk_size)
    }

    #[inline]
    fn cell_at(self, index: usize, chunk_size: i32) -> Option<Self> {
        let size = extent(chunk_size);
        Some(Self::new(
            axis_cell(self.x, chunk_size, index % size)?,
            axis_cell(self.y, chunk_size, index / size)?,
        ))
    }
}

impl From<(i32, i32)> for Coord2D {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<[i32; 2]> for Coord2D {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coord2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A point on the 3D integer grid, or a 3D chunk key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Coord3D {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl Coord3D {
    /// Creates a new coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl ChunkSpace for Coord3D {
    #[inline]
    fn cells_per_chunk(chunk_size: i32) -> Option<usize> {
        positive_extent(chunk_size)?.checked_pow(3)
    }

    #[inline]
    fn chunk_of(self, chunk_size: i32) -> Self {
        Self::new(
            self.x.div_euclid(chunk_size),
            self.y.div_euclid(chunk_size),
            self.z.div_euclid(chunk_size),
        )
    }

    #[inline]
    fn chunk_origin(self, chunk_size: i32) -> Self {
        Self::new(
            axis_origin(self.x, chunk_size),
            axis_origin(self.y, chunk_size),
            axis_origin(self.z, chunk_size),
        )
    }

    #[inline]
    fn local_index(self, chunk_size: i32) -> usize {
        let size = extent(chunk_size);
        let lx = self.x.rem_euclid(chunk_size) as usize;
        let ly = self.y.rem_euclid(chunk_size) as usize;
        let lz = self.z.rem_euclid(chunk_size) as usize;
        lx + ly * size + lz * size * size
    }

    #[inline]
    fn cell_at(self, index: usize, chunk_size: i32) -> Option<Self> {
        let size = extent(chunk_size);
        Some(Self::new(
            axis_cell(self.x, chunk_size, index % size)?,
            axis_cell(self.y, chunk_size, index / size % size)?,
            axis_cell(self.z, chunk_size, index / (size * size))?,
        ))
    }
}

impl From<(i32, i32, i32)> for Coord3D {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[i32; 3]> for Coord3D {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Coord3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
