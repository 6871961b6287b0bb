//! # Entity Management
//!
//! Entities are opaque `(id, generation)` pairs. The `EntityManager` is the
//! only thing that creates or invalidates them; everything else just stores
//! and compares handles.
//!
//! ## Generation scheme
//!
//! - Generation 0 is the null handle and is never issued.
//! - The first handle for an id has generation 1.
//! - Destroying bumps the generation, reissuing bumps it again, so live
//!   generations are always odd and a freed slot always holds an even one.

use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::config::EntityConfig;
use crate::error::{CoreError, CoreResult};

/// Reference to an entity.
///
/// Possessing a handle says nothing about whether the entity still exists;
/// ask the `EntityManager` via [`EntityManager::is_alive`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct EntityHandle {
    /// Id slot, unique within one manager's range at any given time.
    pub id: u64,
    /// Version of the id slot this handle was issued for.
    pub generation: u64,
}

impl EntityHandle {
    /// The null handle. Never alive, stored in every empty grid cell.
    pub const NULL: Self = Self {
        id: 0,
        generation: 0,
    };

    /// Creates a handle from raw parts.
    #[inline]
    #[must_use]
    pub const fn new(id: u64, generation: u64) -> Self {
        Self { id, generation }
    }

    /// Returns the null handle.
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Self::NULL
    }

    /// True for any non-null handle. Liveness is a separate question.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.generation > 0
    }

    /// True for the null handle.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        !self.is_valid()
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.generation)
    }
}

/// Issues, validates and retires generational handles.
///
/// Ids are drawn from `[start_id, start_id + max_count)`. Several managers
/// with disjoint ranges can coexist without their handles ever colliding.
///
/// # Thread Safety
///
/// Not synchronized. Confine each manager to one thread or wrap it yourself.
///
/// # Example
///
/// ```rust,ignore
/// let mut entities = EntityManager::default();
/// let e = entities.create_entity();
/// assert!(entities.is_alive(e));
/// entities.destroy_entity(e);
/// assert!(!entities.is_alive(e));
/// ```
#[derive(Clone, Debug)]
pub struct EntityManager {
    start_id: u64,
    max_count: u64,
    /// Current generation per local id (`id - start_id`).
    generations: Vec<u64>,
    /// Recycled local ids, reused last-freed first.
    free_ids: Vec<u64>,
    alive_count: usize,
}

impl Default for EntityManager {
    fn default() -> Self {
        let config = EntityConfig::default();
        Self::new(config.start_id, config.max_count)
    }
}

impl EntityManager {
    /// Creates a manager issuing ids from `start_id` onwards, at most
    /// `max_count` of them.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty or overflows `u64`.
    #[must_use]
    pub fn new(start_id: u64, max_count: u64) -> Self {
        let config = EntityConfig {
            start_id,
            max_count,
        };
        if let Err(err) = config.validate() {
            panic!("{err}");
        }
        Self::with_range(start_id, max_count)
    }

    /// Creates a manager from a config section.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if the range is unusable.
    pub fn from_config(config: &EntityConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self::with_range(config.start_id, config.max_count))
    }

    fn with_range(start_id: u64, max_count: u64) -> Self {
        Self {
            start_id,
            max_count,
            generations: Vec::new(),
            free_ids: Vec::new(),
            alive_count: 0,
        }
    }

    /// First id of this manager's range.
    #[inline]
    #[must_use]
    pub const fn start_id(&self) -> u64 {
        self.start_id
    }

    /// Number of ids this manager may issue.
    #[inline]
    #[must_use]
    pub const fn max_count(&self) -> u64 {
        self.max_count
    }

    /// Number of live entities.
    #[inline]
    #[must_use]
    pub const fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// Number of distinct ids issued so far, live or recycled.
    #[inline]
    #[must_use]
    pub fn issued_count(&self) -> usize {
        self.generations.len()
    }

    /// Creates a new entity, recycling a freed id when one is available.
    ///
    /// # Panics
    ///
    /// Panics if every id in the configured range is live.
    pub fn create_entity(&mut self) -> EntityHandle {
        match self.try_create_entity() {
            Ok(handle) => handle,
            Err(err) => {
                tracing::error!(start_id = self.start_id, max_count = self.max_count, "{err}");
                panic!("{err}");
            }
        }
    }

    /// Fallible twin of [`create_entity`](Self::create_entity).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EntityCapacityExceeded`] when the range is exhausted.
    pub fn try_create_entity(&mut self) -> CoreResult<EntityHandle> {
        let (local, generation) = if let Some(local) = self.free_ids.pop() {
            let slot = &mut self.generations[to_index(local)];
            *slot += 1;
            (local, *slot)
        } else {
            let local = self.generations.len() as u64;
            if local >= self.max_count {
                return Err(CoreError::EntityCapacityExceeded {
                    start_id: self.start_id,
                    max_count: self.max_count,
                });
            }
            self.generations.push(1);
            (local, 1)
        };

        self.alive_count += 1;
        let handle = EntityHandle::new(self.start_id + local, generation);
        tracing::trace!(id = handle.id, generation = handle.generation, "entity created");
        Ok(handle)
    }

    /// Pure range check against `[start_id, start_id + max_count)`.
    #[inline]
    #[must_use]
    pub fn handle_in_range(&self, handle: EntityHandle) -> bool {
        self.local_id(handle).is_some()
    }

    /// True iff `handle` was issued by this manager and not destroyed since.
    #[must_use]
    pub fn is_alive(&self, handle: EntityHandle) -> bool {
        let Some(local) = self.local_id(handle) else {
            return false;
        };
        match self.generations.get(to_index(local)) {
            Some(&current) => current == handle.generation && current % 2 == 1,
            None => false,
        }
    }

    /// Destroys an entity. Every outstanding copy of `handle` goes stale.
    ///
    /// Dead, foreign and null handles are ignored.
    pub fn destroy_entity(&mut self, handle: EntityHandle) {
        if !self.is_alive(handle) {
            return;
        }
        let local = handle.id - self.start_id;
        self.generations[to_index(local)] += 1;
        self.free_ids.push(local);
        self.alive_count -= 1;
        tracing::trace!(id = handle.id, generation = handle.generation, "entity destroyed");
    }

    /// Current generation stored for `id`, if that id was ever issued.
    #[must_use]
    pub fn generation_of(&self, id: u64) -> Option<u64> {
        let local = id.checked_sub(self.start_id)?;
        self.generations.get(to_index(local)).copied()
    }

    /// Iterates over every live handle in id order.
    pub fn iter_alive(&self) -> impl Iterator<Item = EntityHandle> + '_ {
        self.generations
            .iter()
            .enumerate()
            .filter(|(_, generation)| *generation % 2 == 1)
            .map(move |(local, &generation)| {
                EntityHandle::new(self.start_id + local as u64, generation)
            })
    }

    fn local_id(&self, handle: EntityHandle) -> Option<u64> {
        handle
            .id
            .checked_sub(self.start_id)
            .filter(|&local| local < self.max_count)
    }
}

/// Local ids index `generations`, which can only hold what fits in memory.
#[allow(clippy::cast_possible_truncation)]
#[inline]
const fn to_index(local: u64) -> usize {
    local as usize
}
