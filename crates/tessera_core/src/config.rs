//! # Kernel Configuration
//!
//! Sections deserialized from the `[entities]` and `[pool]` tables of a
//! Tessera config file. Missing keys fall back to the defaults below.

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// Default number of ids an entity manager may issue (10^12).
pub const DEFAULT_MAX_ENTITY_COUNT: u64 = 1_000_000_000_000;

/// Default number of slots a fresh pool starts with.
pub const DEFAULT_POOL_CAPACITY: usize = 1024;

/// Id range handed to an `EntityManager`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    /// First id issued by the manager.
    pub start_id: u64,
    /// Number of distinct ids the manager may issue.
    pub max_count: u64,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            start_id: 0,
            max_count: DEFAULT_MAX_ENTITY_COUNT,
        }
    }
}

impl EntityConfig {
    /// Checks that the range is non-empty and does not overflow `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] when the range is unusable.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_count == 0 {
            return Err(CoreError::InvalidConfig(
                "entities.max_count must be greater than zero".into(),
            ));
        }
        if self.start_id.checked_add(self.max_count).is_none() {
            return Err(CoreError::InvalidConfig(format!(
                "entities range {}+{} overflows u64",
                self.start_id, self.max_count
            )));
        }
        Ok(())
    }
}

/// Sizing for a `PoolAllocator`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Slots allocated up front. Growth doubles from here.
    pub initial_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

impl PoolConfig {
    /// Checks that the pool starts with at least one slot.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] for a zero capacity.
    pub fn validate(&self) -> CoreResult<()> {
        if self.initial_capacity == 0 {
            return Err(CoreError::InvalidConfig(
                "pool.initial_capacity must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
