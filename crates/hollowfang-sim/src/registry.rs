//! Mesh→entity registry.
//!
//! Maps the host's per-mesh ids to simulation entities so ray hits on any
//! mesh of an actor resolve back to the actor.

use std::collections::HashMap;

use hecs::Entity;

use hollowfang_core::types::MeshId;

use crate::collaborators::SceneGraph;

/// Upper bound on parent-chain walks; guards against cyclic host data.
const MAX_PARENT_DEPTH: usize = 32;

#[derive(Debug, Default)]
pub struct MeshRegistry {
    by_mesh: HashMap<MeshId, Entity>,
}

impl MeshRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, mesh: MeshId, entity: Entity) {
        self.by_mesh.insert(mesh, entity);
    }

    pub fn entity_for_mesh(&self, mesh: MeshId) -> Option<Entity> {
        self.by_mesh.get(&mesh).copied()
    }

    /// Drop every mesh registered to `entity`. Returns how many were removed.
    pub fn remove(&mut self, entity: Entity) -> usize {
        let before = self.by_mesh.len();
        self.by_mesh.retain(|_, registered| *registered != entity);
        before - self.by_mesh.len()
    }

    /// Resolve a mesh, or the nearest registered ancestor, to its entity.
    pub fn resolve<S: SceneGraph + ?Sized>(&self, mesh: MeshId, scene: &S) -> Option<Entity> {
        find_in_ancestors(scene, mesh, |candidate| self.entity_for_mesh(candidate))
    }

    pub fn len(&self) -> usize {
        self.by_mesh.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_mesh.is_empty()
    }
}

/// Walk from `mesh` up its parent chain, returning the first match of `probe`.
pub fn find_in_ancestors<S, T>(
    scene: &S,
    mesh: MeshId,
    mut probe: impl FnMut(MeshId) -> Option<T>,
) -> Option<T>
where
    S: SceneGraph + ?Sized,
{
    let mut current = Some(mesh);
    for _ in 0..MAX_PARENT_DEPTH {
        let candidate = current?;
        if let Some(found) = probe(candidate) {
            return Some(found);
        }
        current = scene.parent_mesh(candidate);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessHost;
    use crate::store::EntityStore;

    #[test]
    fn test_resolve_walks_to_registered_parent() {
        let mut host = HeadlessHost::new(1);
        let handles = host.spawn_actor(glam::Vec3::ZERO, 0.5);
        let mut store = EntityStore::new();
        let entity = store.create(());

        let mut registry = MeshRegistry::new();
        for mesh in &handles.meshes {
            registry.register(*mesh, entity);
        }

        let visual_mesh = host.visual_mesh(handles.body).unwrap();
        assert_eq!(registry.entity_for_mesh(visual_mesh), None);
        assert_eq!(registry.resolve(visual_mesh, &host), Some(entity));
    }

    #[test]
    fn test_remove_drops_all_meshes_of_entity() {
        let mut store = EntityStore::new();
        let a = store.create(());
        let b = store.create(());
        let mut registry = MeshRegistry::new();
        registry.register(MeshId(1), a);
        registry.register(MeshId(2), a);
        registry.register(MeshId(3), b);

        assert_eq!(registry.remove(a), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.entity_for_mesh(MeshId(3)), Some(b));
        assert_eq!(registry.entity_for_mesh(MeshId(1)), None);
    }

    #[test]
    fn test_unregistered_chain_resolves_to_none() {
        let mut host = HeadlessHost::new(1);
        let handles = host.spawn_actor(glam::Vec3::ZERO, 0.5);
        let registry = MeshRegistry::new();
        let visual_mesh = host.visual_mesh(handles.body).unwrap();
        assert_eq!(registry.resolve(visual_mesh, &host), None);
    }
}
