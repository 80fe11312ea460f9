//! ECS systems that operate on the entity store each frame.
//!
//! Systems are free functions over the store and the host traits they need.
//! They do not own state: all state lives in components, and the per-frame
//! singletons arrive through `FrameContext`.

pub mod animation;
pub mod combat;
pub mod kinematics;
pub mod sensor;
pub mod snapshot;
pub mod steering;
pub mod timers;
pub mod vitals;
pub mod world_state;

use glam::Vec3;
use hecs::Entity;

use hollowfang_core::components::Transform;

use crate::collaborators::SceneGraph;
use crate::store::EntityStore;

/// World position of an entity's collider node.
pub(crate) fn position_of<S: SceneGraph + ?Sized>(
    store: &EntityStore,
    scene: &S,
    entity: Entity,
) -> Option<Vec3> {
    let node = store.get::<Transform>(entity)?.node;
    Some(scene.world_position(node))
}
