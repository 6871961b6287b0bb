//! # Component Manager
//!
//! One sparse storage per registered component type, keyed by `TypeId`.
//!
//! Registration is explicit: using an unregistered type, or registering a
//! type twice, is a bug in the caller and fails loudly. A missing component
//! on a registered type is ordinary absence and comes back as `None`.

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use super::entity::EntityHandle;
use super::storage::{ComponentStorage, ErasedStorage};
use crate::error::{CoreError, CoreResult};

/// Owns every component storage and their lifetimes.
///
/// Components live independently of entity lifetime. When an entity is
/// destroyed, call [`remove_components`](Self::remove_components) once so
/// nothing stays reachable under the dead handle.
///
/// # Example
///
/// ```rust,ignore
/// let mut components = ComponentManager::new();
/// components.register_component::<Position>();
/// components.add_component(e, Position { x: 10.0, y: 20.0 });
/// assert!(components.get_component::<Position>(e).is_some());
/// ```
#[derive(Default)]
pub struct ComponentManager {
    storages: HashMap<TypeId, Box<dyn ErasedStorage>>,
}

impl ComponentManager {
    /// Creates a manager with no registered types.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers component type `T` with an empty storage.
    ///
    /// # Panics
    ///
    /// Panics if `T` is already registered.
    pub fn register_component<T: 'static>(&mut self) {
        fatal(self.try_register_component::<T>());
    }

    /// Fallible twin of [`register_component`](Self::register_component).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ComponentAlreadyRegistered`] on a second call for `T`.
    pub fn try_register_component<T: 'static>(&mut self) -> CoreResult<()> {
        use std::collections::hash_map::Entry;

        match self.storages.entry(TypeId::of::<T>()) {
            Entry::Occupied(_) => Err(CoreError::ComponentAlreadyRegistered(type_name::<T>())),
            Entry::Vacant(vacant) => {
                vacant.insert(Box::new(ComponentStorage::<T>::new()));
                tracing::debug!(component = type_name::<T>(), "component registered");
                Ok(())
            }
        }
    }

    /// True if `T` has been registered.
    #[must_use]
    pub fn is_registered<T: 'static>(&self) -> bool {
        self.storages.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered component types.
    #[must_use]
    pub fn registered_count(&self) -> usize {
        self.storages.len()
    }

    /// Typed access to the storage for `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not registered.
    #[must_use]
    pub fn storage<T: 'static>(&self) -> &ComponentStorage<T> {
        fatal(self.try_storage::<T>())
    }

    /// Typed mutable access to the storage for `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not registered.
    pub fn storage_mut<T: 'static>(&mut self) -> &mut ComponentStorage<T> {
        fatal(self.try_storage_mut::<T>())
    }

    /// Fallible twin of [`storage`](Self::storage).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ComponentNotRegistered`] if `T` is not registered.
    pub fn try_storage<T: 'static>(&self) -> CoreResult<&ComponentStorage<T>> {
        self.storages
            .get(&TypeId::of::<T>())
            .and_then(|erased| erased.as_any().downcast_ref::<ComponentStorage<T>>())
            .ok_or(CoreError::ComponentNotRegistered(type_name::<T>()))
    }

    /// Fallible twin of [`storage_mut`](Self::storage_mut).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ComponentNotRegistered`] if `T` is not registered.
    pub fn try_storage_mut<T: 'static>(&mut self) -> CoreResult<&mut ComponentStorage<T>> {
        self.storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|erased| erased.as_any_mut().downcast_mut::<ComponentStorage<T>>())
            .ok_or(CoreError::ComponentNotRegistered(type_name::<T>()))
    }

    /// Attaches `component` to `handle`, overwriting any previous value.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not registered.
    pub fn add_component<T: 'static>(&mut self, handle: EntityHandle, component: T) {
        self.storage_mut::<T>().add(handle, component);
    }

    /// The `T` attached to `handle`, or `None` if it has none.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not registered.
    #[must_use]
    pub fn get_component<T: 'static>(&self, handle: EntityHandle) -> Option<&T> {
        self.storage::<T>().get(handle)
    }

    /// Mutable access to the `T` attached to `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not registered.
    pub fn get_component_mut<T: 'static>(&mut self, handle: EntityHandle) -> Option<&mut T> {
        self.storage_mut::<T>().get_mut(handle)
    }

    /// True if `handle` has a `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not registered.
    #[must_use]
    pub fn has_component<T: 'static>(&self, handle: EntityHandle) -> bool {
        self.storage::<T>().has(handle)
    }

    /// Detaches the `T` from `handle`. No-op if it has none.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not registered.
    pub fn remove_component<T: 'static>(&mut self, handle: EntityHandle) {
        self.storage_mut::<T>().remove(handle);
    }

    /// Purges `handle` from every registered storage.
    ///
    /// Returns how many components were removed.
    pub fn remove_components(&mut self, handle: EntityHandle) -> usize {
        let removed = self
            .storages
            .values_mut()
            .filter(|storage| storage.has(handle))
            .map(|storage| storage.remove_erased(handle))
            .filter(|&was_present| was_present)
            .count();
        tracing::trace!(
            id = handle.id,
            generation = handle.generation,
            removed,
            "components purged"
        );
        removed
    }
}

impl std::fmt::Debug for ComponentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.storages
                    .values()
                    .map(|storage| (storage.component_name(), storage.len())),
            )
            .finish()
    }
}

fn fatal<T>(result: CoreResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::error!("{err}");
            panic!("{err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Velocity {
        dx: f32,
        dy: f32,
    }

    #[derive(Debug, PartialEq)]
    struct Name(String);

    fn manager() -> ComponentManager {
        let mut components = ComponentManager::new();
        components.register_component::<Position>();
        components.register_component::<Velocity>();
        components.register_component::<Name>();
        components
    }

    #[test]
    fn test_add_get_remove() {
        let mut components = manager();
        let e = EntityHandle::new(0, 1);

        components.add_component(e, Position { x: 10.0, y: 20.0 });
        assert_eq!(
            components.get_component::<Position>(e),
            Some(&Position { x: 10.0, y: 20.0 })
        );

        components.remove_component::<Position>(e);
        assert!(components.get_component::<Position>(e).is_none());

        // Removing again is a no-op.
        components.remove_component::<Position>(e);
    }

    #[test]
    fn test_missing_component_is_none() {
        let components = manager();
        assert!(components.get_component::<Velocity>(EntityHandle::new(9, 1)).is_none());
        assert!(!components.has_component::<Velocity>(EntityHandle::new(9, 1)));
    }

    #[test]
    fn test_get_component_mut() {
        let mut components = manager();
        let e = EntityHandle::new(0, 1);
        components.add_component(e, Velocity { dx: 1.0, dy: 0.0 });

        if let Some(velocity) = components.get_component_mut::<Velocity>(e) {
            velocity.dy = -2.0;
        }
        assert_eq!(
            components.get_component::<Velocity>(e),
            Some(&Velocity { dx: 1.0, dy: -2.0 })
        );
    }

    #[test]
    fn test_remove_components_purges_all_types() {
        let mut components = manager();
        let e = EntityHandle::new(0, 1);
        let other = EntityHandle::new(1, 1);

        components.add_component(e, Position { x: 1.0, y: 1.0 });
        components.add_component(e, Velocity { dx: 0.0, dy: 1.0 });
        components.add_component(e, Name("crate".into()));
        components.add_component(other, Name("barrel".into()));

        assert_eq!(components.remove_components(e), 3);
        assert!(components.get_component::<Position>(e).is_none());
        assert!(components.get_component::<Velocity>(e).is_none());
        assert!(components.get_component::<Name>(e).is_none());
        assert_eq!(
            components.get_component::<Name>(other),
            Some(&Name("barrel".into()))
        );
        assert_eq!(components.remove_components(e), 0);
    }

    #[test]
    fn test_recycled_id_does_not_inherit_components() {
        let mut components = manager();
        let old = EntityHandle::new(4, 1);
        let recycled = EntityHandle::new(4, 3);
        components.add_component(old, Position { x: 0.0, y: 0.0 });
        assert!(components.get_component::<Position>(recycled).is_none());
    }

    #[test]
    fn test_double_registration_errors() {
        let mut components = manager();
        assert!(matches!(
            components.try_register_component::<Position>(),
            Err(CoreError::ComponentAlreadyRegistered(_))
        ));
        assert_eq!(components.registered_count(), 3);
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn test_double_registration_is_fatal() {
        let mut components = manager();
        components.register_component::<Velocity>();
    }

    #[test]
    #[should_panic(expected = "not registered")]
    fn test_unregistered_lookup_is_fatal() {
        let components = ComponentManager::new();
        let _ = components.get_component::<Position>(EntityHandle::new(0, 1));
    }

    #[test]
    fn test_try_storage_reports_unregistered() {
        let components = ComponentManager::new();
        assert!(!components.is_registered::<Position>());
        assert!(matches!(
            components.try_storage::<Position>(),
            Err(CoreError::ComponentNotRegistered(_))
        ));
    }
}
