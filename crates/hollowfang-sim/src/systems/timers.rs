//! Timer system: counts down `Timer` components and dispatches expired actions.
//!
//! Expired timers are collected first, dispatched in entity order, and only
//! then have their `Timer` removed, so each fires exactly once. Timer-only
//! entities are left empty rather than despawned.

use hecs::Entity;
use log::{trace, warn};

use hollowfang_core::components::{PendingAction, Timer};
use hollowfang_core::events::GameEvent;

use crate::collaborators::{PhysicsWorld, SceneGraph, SteeringPlanner};
use crate::config::SimConfig;
use crate::context::FrameContext;
use crate::registry::MeshRegistry;
use crate::store::EntityStore;
use crate::systems::combat;

/// Run the timer system for one frame. Returns how many timers fired.
pub fn run<H>(
    store: &mut EntityStore,
    host: &mut H,
    registry: &MeshRegistry,
    ctx: &FrameContext,
    config: &SimConfig,
    events: &mut Vec<GameEvent>,
) -> usize
where
    H: PhysicsWorld + SceneGraph + SteeringPlanner + ?Sized,
{
    let mut expired: Vec<(Entity, PendingAction)> = Vec::new();
    for (entity, timer) in store.query_mut::<&mut Timer>() {
        timer.time_remaining -= ctx.dt;
        if timer.time_remaining <= 0.0 {
            trace!("timer {} on {entity:?} expired", timer.label);
            expired.push((entity, timer.action));
        }
    }
    expired.sort_by_key(|(entity, _)| entity.id());

    for (_entity, action) in &expired {
        dispatch(store, host, registry, config, *action, events);
    }
    for (entity, _action) in &expired {
        if let Err(err) = store.remove_component::<Timer>(*entity) {
            warn!("Could not clear expired timer on {entity:?}: {err}");
        }
    }
    expired.len()
}

/// Resolve one pending action. Every action tolerates stale entity ids.
pub fn dispatch<H>(
    store: &mut EntityStore,
    host: &mut H,
    registry: &MeshRegistry,
    config: &SimConfig,
    action: PendingAction,
    events: &mut Vec<GameEvent>,
) where
    H: PhysicsWorld + SceneGraph + SteeringPlanner + ?Sized,
{
    match action {
        PendingAction::PlayerWeaponHit { attacker } => {
            combat::resolve_player_hit(store, host, registry, attacker, events);
        }
        PendingAction::EnemyAttackHit { attacker, target } => {
            combat::resolve_enemy_hit(store, host, attacker, target, config, events);
        }
        PendingAction::EndSwing { entity, started } => {
            if let Some(entity) = store.resolve(entity) {
                combat::end_swing_started_at(store, entity, started, events);
            }
        }
    }
}
