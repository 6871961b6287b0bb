//! # World
//!
//! An entity manager and a component manager kept in step. `despawn`
//! retires the handle and purges its components in one call, so a recycled
//! id never finds orphaned data.
//!
//! Spatial indices are not owned here: a world may be filed into any number
//! of chunk hashmaps, and removing it from those stays with the caller.

use tessera_core::{ComponentManager, EntityHandle, EntityManager};

use crate::config::TesseraConfig;
use crate::error::TesseraResult;

/// Entities plus their components.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = World::default();
/// world.register_component::<Position>();
///
/// let e = world.spawn();
/// world.add_component(e, Position { x: 10.0, y: 20.0 });
/// world.despawn(e);
/// assert!(!world.is_alive(e));
/// ```
#[derive(Debug, Default)]
pub struct World {
    entities: EntityManager,
    components: ComponentManager,
}

impl World {
    /// Creates an empty world using the `[entities]` section of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity range is unusable.
    pub fn new(config: &TesseraConfig) -> TesseraResult<Self> {
        Ok(Self {
            entities: EntityManager::from_config(&config.entities)?,
            components: ComponentManager::new(),
        })
    }

    /// The entity manager.
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }

    /// The component manager.
    #[inline]
    #[must_use]
    pub fn components(&self) -> &ComponentManager {
        &self.components
    }

    /// The component manager, mutably.
    #[inline]
    pub fn components_mut(&mut self) -> &mut ComponentManager {
        &mut self.components
    }

    /// Creates a new entity.
    ///
    /// # Panics
    ///
    /// Panics if the configured id range is exhausted.
    pub fn spawn(&mut self) -> EntityHandle {
        self.entities.create_entity()
    }

    /// Destroys `handle` and purges all its components.
    ///
    /// Returns whether the handle was alive. Dead handles are left alone.
    pub fn despawn(&mut self, handle: EntityHandle) -> bool {
        if !self.entities.is_alive(handle) {
            return false;
        }
        self.entities.destroy_entity(handle);
        self.components.remove_components(handle);
        true
    }

    /// True if `handle` is alive in this world.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, handle: EntityHandle) -> bool {
        self.entities.is_alive(handle)
    }

    /// Registers component type `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is already registered.
    pub fn register_component<T: 'static>(&mut self) {
        self.components.register_component::<T>();
    }

    /// Attaches `component` to `handle`, overwriting any previous value.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not registered.
    pub fn add_component<T: 'static>(&mut self, handle: EntityHandle, component: T) {
        self.components.add_component(handle, component);
    }

    /// The `T` attached to `handle`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not registered.
    #[must_use]
    pub fn get_component<T: 'static>(&self, handle: EntityHandle) -> Option<&T> {
        self.components.get_component(handle)
    }

    /// Spawns a handle to back a unique name, formatted as
    /// `prefix#id:generation`.
    ///
    /// The name stays unique for as long as the handle is alive and is
    /// never reissued afterwards, since generations only grow. Despawn the
    /// handle to retire the name.
    pub fn unique_name(&mut self, prefix: &str) -> (EntityHandle, String) {
        let handle = self.spawn();
        (handle, format!("{prefix}#{handle}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Tag(u8);

    #[test]
    fn test_despawn_purges_components() {
        let mut world = World::default();
        world.register_component::<Tag>();

        let e = world.spawn();
        world.add_component(e, Tag(1));
        assert!(world.despawn(e));
        assert!(!world.despawn(e));

        assert!(world.get_component::<Tag>(e).is_none());
        assert!(world.components().storage::<Tag>().is_empty());
    }

    #[test]
    fn test_unique_names_survive_recycling() {
        let mut world = World::default();
        let (first, first_name) = world.unique_name("button");
        world.despawn(first);
        let (second, second_name) = world.unique_name("button");

        assert_eq!(first.id, second.id);
        assert_eq!(first_name, "button#0:1");
        assert_eq!(second_name, "button#0:3");
    }

    #[test]
    fn test_world_uses_entity_range() {
        let config =
            TesseraConfig::from_toml_str("[entities]\nstart_id = 77\nmax_count = 1").unwrap();
        let mut world = World::new(&config).unwrap();
        assert_eq!(world.spawn().id, 77);
        assert_eq!(world.entities().alive_count(), 1);
    }
}
