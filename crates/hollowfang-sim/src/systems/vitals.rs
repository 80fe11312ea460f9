//! Vitals system: stamina economy, health/stamina clamping, death detection.

use hecs::Entity;
use log::info;

use hollowfang_core::components::*;
use hollowfang_core::constants::MOVE_INPUT_EPSILON;
use hollowfang_core::enums::AiState;
use hollowfang_core::events::GameEvent;

use crate::collaborators::SteeringPlanner;
use crate::config::SimConfig;
use crate::context::FrameContext;
use crate::store::{entity_id, EntityStore};

/// Run the vitals pass for one frame.
///
/// `player_down` latches once the player's death has been announced.
pub fn run<P: SteeringPlanner + ?Sized>(
    store: &mut EntityStore,
    planner: &mut P,
    ctx: &FrameContext,
    config: &SimConfig,
    events: &mut Vec<GameEvent>,
    player_down: &mut bool,
) {
    update_stamina(store, ctx.dt as f32, config);
    clamp_all(store);

    let dying = {
        let mut query = store.query::<(&Enemy, &AiState, &Health)>();
        let dying: Vec<Entity> = query
            .iter()
            .filter(|(_, (_, state, health))| !state.is_dead() && health.is_depleted())
            .map(|(entity, _)| entity)
            .collect();
        dying
    };
    for entity in dying {
        mark_enemy_dead(store, planner, entity, events);
    }

    if let Some(player) = ctx.player {
        let depleted = store
            .get::<Health>(player.entity)
            .is_some_and(|health| health.is_depleted());
        if depleted && !*player_down {
            *player_down = true;
            info!("Player {:?} died", player.entity);
            events.push(GameEvent::PlayerDied {
                entity: entity_id(player.entity),
            });
        }
    }
}

/// Drain stamina while sprinting and moving, regenerate otherwise.
fn update_stamina(store: &mut EntityStore, dt: f32, config: &SimConfig) {
    for (_entity, (stamina, input)) in store.query_mut::<(&mut Stamina, &Input)>() {
        let moving = input.move_dir.x.hypot(input.move_dir.z) > MOVE_INPUT_EPSILON;
        if input.is_sprinting && moving {
            stamina.adjust(-config.stamina_drain_per_sec * dt);
        } else {
            stamina.adjust(config.stamina_regen_per_sec * dt);
        }
    }
}

/// Enforce `0 <= current <= max` on every health and stamina pool.
pub fn clamp_all(store: &mut EntityStore) {
    for (_entity, health) in store.query_mut::<&mut Health>() {
        health.clamp();
    }
    for (_entity, stamina) in store.query_mut::<&mut Stamina>() {
        stamina.clamp();
    }
}

/// Move an enemy into the terminal `Dead` state.
///
/// Drops aggro, clears its steering behaviors and emits the state change and
/// death events. No-op for entities that are already dead or not enemies.
pub fn mark_enemy_dead<P: SteeringPlanner + ?Sized>(
    store: &mut EntityStore,
    planner: &mut P,
    entity: Entity,
    events: &mut Vec<GameEvent>,
) {
    let previous = {
        let Some(mut state) = store.get_mut::<AiState>(entity) else {
            return;
        };
        if state.is_dead() {
            return;
        }
        let previous = *state;
        *state = AiState::Dead;
        previous
    };

    if let Some(mut enemy) = store.get_mut::<Enemy>(entity) {
        enemy.is_aggro = false;
    }
    let vehicle = store.get::<AiAgent>(entity).map(|agent| agent.vehicle);
    if let Some(vehicle) = vehicle {
        planner.clear_behaviors(vehicle);
    }

    info!("{entity:?} died");
    let id = entity_id(entity);
    events.push(GameEvent::EnemyStateChanged {
        entity: id,
        from: previous,
        to: AiState::Dead,
    });
    events.push(GameEvent::EnemyDied { entity: id });
}
