//! # Tessera Core
//!
//! The kernel every other Tessera layer builds on:
//! - Generational entity handles, issued and retired by one `EntityManager`
//! - Type-erased sparse component storage
//! - A pool allocator that never moves what it has handed out
//!
//! ## Architecture Rules
//!
//! 1. **Handles are checked, not trusted** - possession proves nothing, ask
//!    the entity manager
//! 2. **Loud on misuse** - programmer errors panic (or return `CoreError`
//!    from the `try_*` variants); expected absence is `Option`/`bool`
//! 3. **Single-threaded** - no locks, no atomics, no background work
//!
//! ## Example
//!
//! ```rust,ignore
//! use tessera_core::{ComponentManager, EntityManager};
//!
//! let mut entities = EntityManager::default();
//! let mut components = ComponentManager::new();
//! components.register_component::<Position>();
//!
//! let e = entities.create_entity();
//! components.add_component(e, Position { x: 10.0, y: 20.0 });
//!
//! entities.destroy_entity(e);
//! components.remove_components(e);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod ecs;
pub mod error;
pub mod memory;

pub use config::{EntityConfig, PoolConfig};
pub use ecs::{ComponentManager, ComponentStorage, EntityHandle, EntityManager, ErasedStorage};
pub use error::{CoreError, CoreResult};
pub use memory::{PoolAllocator, PoolHandle};
