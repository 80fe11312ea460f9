//! Per-frame simulation context.
//!
//! Singletons (player, world state) are resolved once at the start of a frame
//! and handed to every system explicitly. A missing singleton means the game
//! is not initialized yet: systems that need it skip the frame without
//! touching any state.

use glam::Vec3;
use hecs::Entity;

use hollowfang_core::components::{Health, Player, Transform, WorldState};

use crate::collaborators::SceneGraph;
use crate::store::EntityStore;

/// The player as seen at the start of the frame.
#[derive(Debug, Clone, Copy)]
pub struct PlayerContext {
    pub entity: Entity,
    pub position: Vec3,
    pub alive: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Frame length in simulated seconds.
    pub dt: f64,
    /// Simulation clock at the end of this frame.
    pub now: f64,
    pub player: Option<PlayerContext>,
    pub world_state: Option<Entity>,
}

impl FrameContext {
    pub fn resolve<S: SceneGraph + ?Sized>(
        store: &EntityStore,
        scene: &S,
        dt: f64,
        now: f64,
    ) -> Self {
        Self {
            dt,
            now,
            player: resolve_player(store, scene),
            world_state: store.first::<WorldState>(),
        }
    }
}

fn resolve_player<S: SceneGraph + ?Sized>(store: &EntityStore, scene: &S) -> Option<PlayerContext> {
    let entity = store.first::<Player>()?;
    let node = store.get::<Transform>(entity)?.node;
    let alive = store
        .get::<Health>(entity)
        .map_or(true, |health| !health.is_depleted());

    Some(PlayerContext {
        entity,
        position: scene.world_position(node),
        alive,
    })
}
