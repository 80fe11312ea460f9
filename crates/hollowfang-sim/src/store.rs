//! Entity store: the archetype ECS world behind every system.
//!
//! Wraps `hecs::World` with the operations the simulation relies on:
//! component add/remove on live entities, live queries, and a cached
//! "first entity with T" lookup for the `Player` and `WorldState` singletons.
//!
//! Queries are re-evaluated every time they are built, so an entity that
//! gains or loses a required component shows up in (or drops out of) the next
//! query. Systems that change structure while walking a query collect first and
//! apply afterwards.

use std::any::{type_name, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

use hecs::{Component, ComponentError, DynamicBundle, Entity, Query, QueryBorrow, QueryMut, World};
use thiserror::Error;

use hollowfang_core::types::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("entity {0:?} does not exist")]
    NoSuchEntity(EntityId),
    #[error("entity {entity:?} has no {component} component")]
    MissingComponent {
        entity: EntityId,
        component: &'static str,
    },
}

/// Stable id for an ECS entity.
pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

#[derive(Default)]
pub struct EntityStore {
    world: World,
    first_cache: RefCell<HashMap<TypeId, Entity>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an entity with a full component set.
    pub fn create(&mut self, components: impl DynamicBundle) -> Entity {
        self.world.spawn(components)
    }

    /// Add (or replace) one component on an existing entity.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<(), StoreError> {
        self.world
            .insert_one(entity, component)
            .map_err(|_| StoreError::NoSuchEntity(entity_id(entity)))
    }

    /// Remove one component, returning it. Other components are untouched.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T, StoreError> {
        self.world
            .remove_one::<T>(entity)
            .map_err(|err| match err {
                ComponentError::NoSuchEntity => StoreError::NoSuchEntity(entity_id(entity)),
                ComponentError::MissingComponent(_) => StoreError::MissingComponent {
                    entity: entity_id(entity),
                    component: type_name::<T>(),
                },
            })
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<hecs::Ref<'_, T>> {
        self.world.get::<&T>(entity).ok()
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<hecs::RefMut<'_, T>> {
        self.world.get::<&mut T>(entity).ok()
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.world.get::<&T>(entity).is_ok()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    /// Map a stable id back to a live entity.
    pub fn resolve(&self, id: EntityId) -> Option<Entity> {
        Entity::from_bits(id.0).filter(|entity| self.world.contains(*entity))
    }

    pub fn query<Q: Query>(&self) -> QueryBorrow<'_, Q> {
        self.world.query::<Q>()
    }

    pub fn query_mut<Q: Query>(&mut self) -> QueryMut<'_, Q> {
        self.world.query_mut::<Q>()
    }

    /// First entity carrying `T`.
    ///
    /// The last answer is cached per component type and revalidated before
    /// use, so repeated singleton lookups skip the archetype scan.
    pub fn first<T: Component>(&self) -> Option<Entity> {
        let key = TypeId::of::<T>();
        let cached = self.first_cache.borrow().get(&key).copied();
        if let Some(entity) = cached {
            if self.has::<T>(entity) {
                return Some(entity);
            }
        }

        let found = self.world.query::<&T>().iter().next().map(|(entity, _)| entity);
        let mut cache = self.first_cache.borrow_mut();
        match found {
            Some(entity) => {
                cache.insert(key, entity);
            }
            None => {
                cache.remove(&key);
            }
        }
        found
    }

    /// Snapshot of every entity currently carrying `T`.
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        self.world
            .query::<&T>()
            .iter()
            .map(|(entity, _)| entity)
            .collect()
    }

    pub fn count<T: Component>(&self) -> usize {
        self.world.query::<&T>().iter().count()
    }

    pub fn len(&self) -> u32 {
        self.world.len()
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }

    /// Number of components on an entity, or `None` if it does not exist.
    pub fn component_count(&self, entity: Entity) -> Option<usize> {
        self.world
            .entity(entity)
            .ok()
            .map(|entity_ref| entity_ref.component_types().count())
    }

    pub fn world(&self) -> &World {
        &self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Marker(u32);

    #[derive(Debug, PartialEq)]
    struct Tag;

    #[test]
    fn test_add_and_remove_component_keep_others() {
        let mut store = EntityStore::new();
        let entity = store.create((Marker(1),));
        store.add_component(entity, Tag).unwrap();
        assert!(store.has::<Tag>(entity));

        let removed = store.remove_component::<Tag>(entity).unwrap();
        assert_eq!(removed, Tag);
        assert!(!store.has::<Tag>(entity));
        assert_eq!(store.get::<Marker>(entity).map(|m| m.0), Some(1));
    }

    #[test]
    fn test_remove_missing_component_is_typed_error() {
        let mut store = EntityStore::new();
        let entity = store.create((Marker(1),));
        let err = store.remove_component::<Tag>(entity).unwrap_err();
        assert!(matches!(err, StoreError::MissingComponent { .. }));
    }

    #[test]
    fn test_add_to_despawned_entity_fails() {
        let mut store = EntityStore::new();
        let entity = store.create((Marker(1),));
        store.world.despawn(entity).unwrap();
        let err = store.add_component(entity, Tag).unwrap_err();
        assert_eq!(err, StoreError::NoSuchEntity(entity_id(entity)));
    }

    #[test]
    fn test_query_reflects_membership_changes() {
        let mut store = EntityStore::new();
        let a = store.create((Marker(1), Tag));
        let b = store.create((Marker(2),));
        assert_eq!(store.count::<Tag>(), 1);

        store.add_component(b, Tag).unwrap();
        store.remove_component::<Tag>(a).unwrap();

        let tagged = store.entities_with::<Tag>();
        assert_eq!(tagged, vec![b]);
    }

    #[test]
    fn test_first_revalidates_cache() {
        let mut store = EntityStore::new();
        let a = store.create((Tag,));
        assert_eq!(store.first::<Tag>(), Some(a));

        store.remove_component::<Tag>(a).unwrap();
        assert_eq!(store.first::<Tag>(), None);

        let b = store.create((Tag,));
        assert_eq!(store.first::<Tag>(), Some(b));
        assert_eq!(store.first::<Tag>(), Some(b));
    }

    #[test]
    fn test_entity_id_round_trip() {
        let mut store = EntityStore::new();
        let entity = store.create((Marker(9),));
        let id = entity_id(entity);
        assert_eq!(store.resolve(id), Some(entity));

        store.world.despawn(entity).unwrap();
        assert_eq!(store.resolve(id), None);
    }

    #[test]
    fn test_emptied_entity_stays_alive() {
        let mut store = EntityStore::new();
        let entity = store.create((Tag,));
        store.remove_component::<Tag>(entity).unwrap();
        assert!(store.contains(entity));
        assert_eq!(store.component_count(entity), Some(0));
    }
}
