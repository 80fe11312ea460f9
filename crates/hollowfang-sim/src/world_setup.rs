//! Entity spawn factories for assembling the simulation world.
//!
//! Creates the world-state singleton, the player and enemies with complete,
//! internally consistent component bundles. Scene nodes, bodies, meshes and
//! vehicles are created by the host and handed in as `ActorHandles`.

use glam::{Quat, Vec3};
use hecs::Entity;
use log::info;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use hollowfang_ai::profiles::get_profile;
use hollowfang_core::components::*;
use hollowfang_core::constants::*;
use hollowfang_core::enums::*;
use hollowfang_core::types::*;

use crate::config::SimConfig;
use crate::registry::MeshRegistry;
use crate::store::EntityStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("a {0} entity already exists")]
    DuplicateSingleton(&'static str),
    #[error("{archetype} needs a {handle} handle")]
    MissingHandle {
        archetype: &'static str,
        handle: &'static str,
    },
}

/// Host-side objects backing one actor.
#[derive(Debug, Clone)]
pub struct ActorHandles {
    /// Collider node; its world position is the actor's ground truth.
    pub node: NodeHandle,
    pub body: BodyHandle,
    /// Renderable child node.
    pub visual: NodeHandle,
    pub rotation_offset: Quat,
    /// Meshes that resolve to this actor in ray hits.
    pub meshes: Vec<MeshId>,
    pub vehicle: Option<VehicleHandle>,
    pub camera: Option<CameraHandle>,
    pub has_swing_animation: bool,
}

/// Spawn the world-state singleton.
pub fn spawn_world_state(store: &mut EntityStore) -> Result<Entity, SetupError> {
    if store.first::<WorldState>().is_some() {
        return Err(SetupError::DuplicateSingleton("WorldState"));
    }
    Ok(store.create((WorldState::default(),)))
}

/// Spawn the player with full vitals, weapon and sensor.
pub fn spawn_player(
    store: &mut EntityStore,
    registry: &mut MeshRegistry,
    handles: &ActorHandles,
    config: &SimConfig,
) -> Result<Entity, SetupError> {
    if store.first::<Player>().is_some() {
        return Err(SetupError::DuplicateSingleton("Player"));
    }
    let camera = handles.camera.ok_or(SetupError::MissingHandle {
        archetype: "player",
        handle: "camera",
    })?;

    let weapon = Weapon {
        damage: PLAYER_WEAPON_DAMAGE,
        range: PLAYER_WEAPON_RANGE,
        cooldown: PLAYER_WEAPON_COOLDOWN,
        last_attack_time: None,
        state: WeaponState::Idle,
        has_swing_animation: handles.has_swing_animation,
    };

    let locomotion = Locomotion {
        walk_speed: PLAYER_WALK_SPEED,
        sprint_multiplier: PLAYER_SPRINT_MULTIPLIER,
        jump_velocity: PLAYER_JUMP_VELOCITY,
    };

    let entity = store.create((
        Player { id: 0, camera },
        Transform { node: handles.node },
        Visual {
            node: handles.visual,
            rotation_offset: handles.rotation_offset,
        },
        Physics { body: handles.body },
        Health::full(PLAYER_MAX_HEALTH),
        Stamina::full(PLAYER_MAX_STAMINA),
        weapon,
        Input::default(),
        locomotion,
        Sensor::new(config.sensor_range),
        AnimationState::default(),
    ));

    register_meshes(registry, handles, entity);
    info!("Spawned player {entity:?}");
    Ok(entity)
}

/// Spawn an enemy of the given archetype, idle and wandering.
pub fn spawn_enemy(
    store: &mut EntityStore,
    registry: &mut MeshRegistry,
    kind: EnemyKind,
    handles: &ActorHandles,
) -> Result<Entity, SetupError> {
    let vehicle = handles.vehicle.ok_or(SetupError::MissingHandle {
        archetype: "enemy",
        handle: "vehicle",
    })?;
    let profile = get_profile(kind);

    let combat = Combat {
        damage: profile.damage,
        range: profile.attack_range,
        cooldown: profile.attack_cooldown,
        last_attack_time: 0.0,
        attack_duration: profile.attack_duration,
    };

    let entity = store.create((
        Enemy {
            kind,
            is_aggro: false,
        },
        Transform { node: handles.node },
        Visual {
            node: handles.visual,
            rotation_offset: handles.rotation_offset,
        },
        Physics { body: handles.body },
        AiAgent { vehicle },
        AiState::Idle,
        Health::full(profile.max_health),
        combat,
        AnimationState::default(),
    ));

    register_meshes(registry, handles, entity);
    info!("Spawned {kind:?} {entity:?}");
    Ok(entity)
}

fn register_meshes(registry: &mut MeshRegistry, handles: &ActorHandles, entity: Entity) {
    for mesh in &handles.meshes {
        registry.register(*mesh, entity);
    }
}

/// Spawn positions on a ring around `center`, at ground height of `center`.
pub fn scatter_positions(
    rng: &mut ChaCha8Rng,
    center: Vec3,
    count: usize,
    min_radius: f32,
    max_radius: f32,
) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
            let radius: f32 = if max_radius > min_radius {
                rng.gen_range(min_radius..max_radius)
            } else {
                min_radius
            };
            center + Vec3::new(radius * angle.sin(), 0.0, radius * angle.cos())
        })
        .collect()
}
