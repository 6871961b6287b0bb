//! # Pool Allocator
//!
//! Fixed-type object pool with a LIFO free list.
//!
//! The backing store is a list of segments. When the free list runs dry the
//! pool doubles its capacity by appending a new segment, so objects already
//! handed out never move. Callers hold index handles, not pointers.

use crate::config::PoolConfig;
use crate::error::{CoreError, CoreResult};

/// A growable pool for objects of one type.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. Use one pool per thread or wrap in a mutex.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool: PoolAllocator<Particle> = PoolAllocator::new(1024);
///
/// let handle = pool.allocate();
/// pool.get_mut(handle).unwrap().life = 1.0;
///
/// pool.deallocate(handle);
/// ```
pub struct PoolAllocator<T> {
    /// Storage segments, in slot order. Never reallocated once pushed.
    segments: Vec<Box<[Option<T>]>>,
    /// First slot index of each segment.
    segment_starts: Vec<usize>,
    /// Free slot indices; the last pushed is the next reused.
    free_list: Vec<usize>,
    /// Number of allocated objects.
    allocated_count: usize,
    /// Total slots across all segments.
    capacity: usize,
}

/// Handle to an allocated object in a pool.
///
/// A handle is a bare slot index with no generation. Once its object is
/// deallocated and the slot is reused, a stale handle reaches the new
/// occupant, and `deallocate` only reports it as a double free while the
/// slot is still empty. Callers that need stale detection pair the pool
/// with an [`EntityHandle`](crate::EntityHandle).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolHandle {
    /// Index into the pool.
    index: usize,
}

impl PoolHandle {
    /// Slot index this handle refers to.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl<T> PoolAllocator<T> {
    /// Creates a new pool with `capacity` slots ready up front.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        let mut pool = Self {
            segments: Vec::new(),
            segment_starts: Vec::new(),
            free_list: Vec::new(),
            allocated_count: 0,
            capacity: 0,
        };
        pool.grow(capacity);
        pool
    }

    /// Creates a pool sized from a config section.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] for a zero initial capacity.
    pub fn from_config(config: &PoolConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self::new(config.initial_capacity))
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of currently allocated objects.
    #[inline]
    #[must_use]
    pub const fn allocated_count(&self) -> usize {
        self.allocated_count
    }

    /// Returns the number of free slots.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.capacity - self.allocated_count
    }

    /// Stores `value` in a free slot, doubling the pool first if none is left.
    pub fn allocate_with(&mut self, value: T) -> PoolHandle {
        if self.free_list.is_empty() {
            self.grow(self.capacity * 2);
        }

        let Some(index) = self.free_list.pop() else {
            unreachable!("grow() always leaves free slots behind");
        };
        if let Some(slot) = self.slot_mut(index) {
            *slot = Some(value);
        }
        self.allocated_count += 1;

        PoolHandle { index }
    }

    /// Frees an allocated object, dropping it in place.
    ///
    /// # Panics
    ///
    /// Panics with "invalid pointer deallocation" if the handle is out of
    /// bounds or its slot is already free.
    pub fn deallocate(&mut self, handle: PoolHandle) {
        if let Err(err) = self.try_deallocate(handle) {
            tracing::error!(index = handle.index, capacity = self.capacity, "{err}");
            panic!("{err}");
        }
    }

    /// Fallible twin of [`deallocate`](Self::deallocate).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDeallocation`] if the handle does not
    /// refer to a live slot.
    pub fn try_deallocate(&mut self, handle: PoolHandle) -> CoreResult<()> {
        let capacity = self.capacity;
        let invalid = CoreError::InvalidDeallocation {
            index: handle.index,
            capacity,
        };

        let slot = self.slot_mut(handle.index).ok_or_else(|| invalid.clone())?;
        if slot.take().is_none() {
            return Err(invalid);
        }

        self.free_list.push(handle.index);
        self.allocated_count -= 1;
        Ok(())
    }

    /// True if `handle` refers to a live object.
    #[inline]
    #[must_use]
    pub fn is_allocated(&self, handle: PoolHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Gets a reference to an allocated object.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        let (segment, offset) = self.locate(handle.index)?;
        self.segments[segment][offset].as_ref()
    }

    /// Gets a mutable reference to an allocated object.
    #[inline]
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.slot_mut(handle.index)?.as_mut()
    }

    /// Frees every object, keeping all segments for reuse.
    pub fn clear(&mut self) {
        for slot in self.segments.iter_mut().flat_map(|segment| segment.iter_mut()) {
            *slot = None;
        }
        self.free_list.clear();
        self.free_list.extend((0..self.capacity).rev());
        self.allocated_count = 0;
    }

    /// Iterates over all allocated objects in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (PoolHandle, &T)> {
        self.segments
            .iter()
            .flat_map(|segment| segment.iter())
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|v| (PoolHandle { index }, v)))
    }

    /// Iterates mutably over all allocated objects in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PoolHandle, &mut T)> {
        self.segments
            .iter_mut()
            .flat_map(|segment| segment.iter_mut())
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|v| (PoolHandle { index }, v)))
    }

    /// Appends a segment so the pool holds `new_capacity` slots.
    fn grow(&mut self, new_capacity: usize) {
        let old_capacity = self.capacity;
        debug_assert!(new_capacity > old_capacity);

        let segment: Box<[Option<T>]> = (old_capacity..new_capacity).map(|_| None).collect();
        self.segments.push(segment);
        self.segment_starts.push(old_capacity);

        // Lowest new index ends up on top of the stack.
        self.free_list.extend((old_capacity..new_capacity).rev());
        self.capacity = new_capacity;

        tracing::debug!(
            old_capacity,
            new_capacity,
            segments = self.segments.len(),
            "pool grown"
        );
    }

    fn locate(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.capacity {
            return None;
        }
        let segment = self.segment_starts.partition_point(|&start| start <= index) - 1;
        Some((segment, index - self.segment_starts[segment]))
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut Option<T>> {
        let (segment, offset) = self.locate(index)?;
        Some(&mut self.segments[segment][offset])
    }
}

impl<T: Default> PoolAllocator<T> {
    /// Allocates a default-initialized object and returns its handle.
    pub fn allocate(&mut self) -> PoolHandle {
        self.allocate_with(T::default())
    }
}

impl<T> Default for PoolAllocator<T> {
    fn default() -> Self {
        Self::new(PoolConfig::default().initial_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Position {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_pool_allocate_free() {
        let mut pool: PoolAllocator<u32> = PoolAllocator::new(10);

        let h1 = pool.allocate_with(42);
        assert_eq!(*pool.get(h1).unwrap(), 42);
        assert_eq!(pool.allocated_count(), 1);

        pool.deallocate(h1);
        assert_eq!(pool.allocated_count(), 0);
        assert!(!pool.is_allocated(h1));
    }

    #[test]
    fn test_two_allocations_are_distinct() {
        let mut pool: PoolAllocator<Position> = PoolAllocator::new(4);
        let a = pool.allocate();
        let b = pool.allocate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_pool_reuse_resets_to_default() {
        let mut pool: PoolAllocator<Position> = PoolAllocator::new(4);

        let h1 = pool.allocate();
        pool.get_mut(h1).unwrap().x = 10;
        pool.deallocate(h1);

        let h2 = pool.allocate();
        assert_eq!(h1, h2); // Last freed, first reused
        assert_eq!(pool.get(h2), Some(&Position::default()));
    }

    #[test]
    fn test_lifo_reuse_order() {
        let mut pool: PoolAllocator<u8> = PoolAllocator::new(8);
        let a = pool.allocate();
        let b = pool.allocate();
        pool.deallocate(a);
        pool.deallocate(b);

        assert_eq!(pool.allocate(), b);
        assert_eq!(pool.allocate(), a);
    }

    #[test]
    fn test_growth_doubles_capacity() {
        let mut pool: PoolAllocator<u8> = PoolAllocator::new(2);
        let _ = pool.allocate();
        let _ = pool.allocate();
        assert_eq!(pool.capacity(), 2);

        let third = pool.allocate();
        assert_eq!(pool.capacity(), 4);
        assert_eq!(third.index(), 2);
        assert_eq!(pool.free_count(), 1);
    }

    #[test]
    fn test_growth_does_not_move_objects() {
        let mut pool: PoolAllocator<Position> = PoolAllocator::new(1);
        let first = pool.allocate_with(Position { x: 1, y: 2 });
        let before: *const Position = pool.get(first).unwrap();

        for _ in 0..100 {
            let _ = pool.allocate();
        }

        let after: *const Position = pool.get(first).unwrap();
        assert!(std::ptr::eq(before, after));
        assert_eq!(pool.get(first).map(|p| (p.x, p.y)), Some((1, 2)));
    }

    #[test]
    fn test_invalid_deallocation() {
        let mut pool: PoolAllocator<u8> = PoolAllocator::new(2);
        let h = pool.allocate();
        pool.deallocate(h);

        assert_eq!(
            pool.try_deallocate(h),
            Err(CoreError::InvalidDeallocation {
                index: h.index(),
                capacity: 2
            })
        );
        assert!(pool
            .try_deallocate(PoolHandle { index: 99 })
            .is_err());
    }

    #[test]
    #[should_panic(expected = "invalid pointer deallocation")]
    fn test_double_free_is_fatal() {
        let mut pool: PoolAllocator<u8> = PoolAllocator::new(2);
        let h = pool.allocate();
        pool.deallocate(h);
        pool.deallocate(h);
    }

    #[test]
    fn test_stale_handle_reaches_reused_slot() {
        let mut pool: PoolAllocator<u32> = PoolAllocator::new(2);
        let stale = pool.allocate_with(1);
        pool.deallocate(stale);
        let fresh = pool.allocate_with(2);

        assert_eq!(stale, fresh);
        assert_eq!(pool.get(stale), Some(&2));
        assert!(pool.try_deallocate(stale).is_ok());
        assert!(pool.try_deallocate(fresh).is_err());
    }

    #[test]
    fn test_iter_spans_segments() {
        let mut pool: PoolAllocator<u32> = PoolAllocator::new(1);
        let handles: Vec<_> = (0..5).map(|i| pool.allocate_with(i)).collect();
        pool.deallocate(handles[1]);

        let values: Vec<u32> = pool.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![0, 2, 3, 4]);

        for (_, v) in pool.iter_mut() {
            *v *= 10;
        }
        assert_eq!(pool.get(handles[4]), Some(&40));
    }

    #[test]
    fn test_clear() {
        let mut pool: PoolAllocator<u32> = PoolAllocator::new(3);
        let _ = pool.allocate_with(1);
        let _ = pool.allocate_with(2);

        pool.clear();
        assert_eq!(pool.allocated_count(), 0);
        assert_eq!(pool.free_count(), 3);
        assert_eq!(pool.iter().count(), 0);
    }
}
