//! # Entities and Components
//!
//! ## Design Philosophy
//!
//! - The `EntityManager` is the single source of truth for handle validity
//! - Component storage is sparse and keyed by the full handle
//! - Storages are type-erased behind `ErasedStorage` so an entity can be
//!   purged without naming its component types

mod component;
mod entity;
mod storage;

pub use component::ComponentManager;
pub use entity::{EntityHandle, EntityManager};
pub use storage::{ComponentStorage, ErasedStorage};
