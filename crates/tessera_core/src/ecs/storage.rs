//! # Component Storage
//!
//! Sparse, per-type maps from handle to value. An entity only occupies
//! memory in the storages of the component types it actually has.
//!
//! Storages are keyed by the full handle, so a component attached to a
//! stale handle is never visible through a recycled one.

use std::any::Any;
use std::collections::HashMap;

use super::entity::EntityHandle;

/// Type-erased view of a `ComponentStorage<T>`.
///
/// The component manager keeps one of these per registered type so it can
/// purge an entity without knowing any concrete component types. Typed
/// access goes through the `as_any` downcasts.
pub trait ErasedStorage: Any {
    /// True if `handle` has a value in this storage.
    fn has(&self, handle: EntityHandle) -> bool;

    /// Drops the value for `handle`. Returns whether one was present.
    fn remove_erased(&mut self, handle: EntityHandle) -> bool;

    /// Number of stored values.
    fn len(&self) -> usize;

    /// True if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the stored component type, for diagnostics.
    fn component_name(&self) -> &'static str;

    /// Upcast for typed lookup.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed lookup.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Storage for a single component type.
///
/// At most one value per handle; adding again overwrites.
///
/// # Example
///
/// ```rust,ignore
/// let mut positions: ComponentStorage<Position> = ComponentStorage::new();
/// positions.add(e, Position { x: 1.0, y: 2.0 });
/// assert!(positions.has(e));
/// ```
#[derive(Clone, Debug)]
pub struct ComponentStorage<T> {
    data: HashMap<EntityHandle, T>,
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self {
            data: HashMap::new(),
        }
    }
}

impl<T: 'static> ComponentStorage<T> {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the value for `handle`.
    #[inline]
    pub fn add(&mut self, handle: EntityHandle, component: T) {
        self.data.insert(handle, component);
    }

    /// Gets the value for `handle`, or `None` if it has none.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: EntityHandle) -> Option<&T> {
        self.data.get(&handle)
    }

    /// Gets the value for `handle` mutably.
    #[inline]
    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut T> {
        self.data.get_mut(&handle)
    }

    /// Removes and returns the value for `handle`, if any.
    #[inline]
    pub fn remove(&mut self, handle: EntityHandle) -> Option<T> {
        self.data.remove(&handle)
    }

    /// True if `handle` has a value here.
    #[inline]
    #[must_use]
    pub fn has(&self, handle: EntityHandle) -> bool {
        self.data.contains_key(&handle)
    }

    /// Number of stored values.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing is stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over `(handle, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, &T)> {
        self.data.iter().map(|(handle, value)| (*handle, value))
    }

    /// Iterates mutably over `(handle, value)` pairs in no particular order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityHandle, &mut T)> {
        self.data.iter_mut().map(|(handle, value)| (*handle, value))
    }

    /// Drops every stored value.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T: 'static> ErasedStorage for ComponentStorage<T> {
    fn has(&self, handle: EntityHandle) -> bool {
        ComponentStorage::has(self, handle)
    }

    fn remove_erased(&mut self, handle: EntityHandle) -> bool {
        self.remove(handle).is_some()
    }

    fn len(&self) -> usize {
        ComponentStorage::len(self)
    }

    fn component_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
