//! Sensor system: what the player is looking at.
//!
//! Each frame the sensor is wiped and recomputed from a camera ray. Hits walk
//! up the mesh hierarchy to the first mesh that is either registered to an
//! entity or carries interaction metadata. A `TargetChanged` event fires only
//! when the resolved target differs from last frame's.

use glam::Vec3;
use hecs::Entity;
use log::debug;

use hollowfang_core::components::{InteractionMetadata, Player, Sensor, SensorTarget};
use hollowfang_core::events::GameEvent;
use hollowfang_core::types::{MeshId, Ray};

use crate::collaborators::{PhysicsWorld, SceneGraph};
use crate::registry::{find_in_ancestors, MeshRegistry};
use crate::store::{entity_id, EntityStore};

/// What a hit mesh resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedTarget {
    Entity(Entity),
    Interactable(InteractionMetadata),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensorHit {
    pub distance: f32,
    pub point: Vec3,
    pub target: ResolvedTarget,
}

pub fn run<H>(
    store: &mut EntityStore,
    host: &H,
    registry: &MeshRegistry,
    events: &mut Vec<GameEvent>,
) where
    H: PhysicsWorld + SceneGraph + ?Sized,
{
    let sensors = {
        let mut query = store.query::<(&Player, &Sensor)>();
        let sensors: Vec<(Entity, Ray, f32, Option<SensorTarget>)> = query
            .iter()
            .map(|(entity, (player, sensor))| {
                (
                    entity,
                    host.camera_ray(player.camera),
                    sensor.check_range,
                    sensor.target(),
                )
            })
            .collect();
        sensors
    };

    for (entity, ray, range, previous) in sensors {
        let hit = cast_sensor(host, registry, entity, &ray, range);

        let current = {
            let Some(mut sensor) = store.get_mut::<Sensor>(entity) else {
                continue;
            };
            sensor.reset();
            if let Some(hit) = hit {
                sensor.hit_distance = Some(hit.distance);
                sensor.hit_point = Some(hit.point);
                match hit.target {
                    ResolvedTarget::Entity(target) => sensor.hit_entity = Some(entity_id(target)),
                    ResolvedTarget::Interactable(metadata) => sensor.hit_metadata = Some(metadata),
                }
            }
            sensor.target()
        };

        if current != previous {
            debug!("{entity:?} target -> {current:?}");
            events.push(GameEvent::TargetChanged {
                entity: entity_id(entity),
                target: current,
            });
        }
    }
}

/// Cast `ray` for `owner`, ignoring the owner's own meshes.
pub fn cast_sensor<H>(
    host: &H,
    registry: &MeshRegistry,
    owner: Entity,
    ray: &Ray,
    range: f32,
) -> Option<SensorHit>
where
    H: PhysicsWorld + SceneGraph + ?Sized,
{
    let mut not_self = |mesh: MeshId| registry.resolve(mesh, host) != Some(owner);
    let hit = host.cast_ray(ray, range, &mut not_self)?;
    let target = resolve_target(host, registry, hit.mesh)?;
    Some(SensorHit {
        distance: hit.distance,
        point: hit.point,
        target,
    })
}

/// First registered entity or interaction metadata on the mesh's parent chain.
pub fn resolve_target<S: SceneGraph + ?Sized>(
    scene: &S,
    registry: &MeshRegistry,
    mesh: MeshId,
) -> Option<ResolvedTarget> {
    find_in_ancestors(scene, mesh, |candidate| {
        registry
            .entity_for_mesh(candidate)
            .map(ResolvedTarget::Entity)
            .or_else(|| {
                scene
                    .interaction_metadata(candidate)
                    .map(ResolvedTarget::Interactable)
            })
    })
}
