//! Steering orchestrator: aggro decisions and behavior-list reconciliation.
//!
//! Points the shared seek target at the player, runs the aggro pass from
//! hollowfang-ai for every enemy, then makes each vehicle's behavior list
//! match its state.

use hecs::Entity;
use log::debug;

use hollowfang_core::components::{AiAgent, Enemy, Transform};
use hollowfang_core::enums::AiState;
use hollowfang_core::events::GameEvent;
use hollowfang_core::types::VehicleHandle;

use hollowfang_ai::fsm::{evaluate_aggro, AggroDecision};
use hollowfang_ai::steering::{desired_behaviors, needs_swap};

use crate::collaborators::{SceneGraph, SteeringPlanner};
use crate::config::SimConfig;
use crate::context::FrameContext;
use crate::store::{entity_id, EntityStore};

/// Run the steering orchestrator for one frame.
pub fn run<H>(
    store: &mut EntityStore,
    host: &mut H,
    ctx: &FrameContext,
    config: &SimConfig,
    events: &mut Vec<GameEvent>,
) where
    H: SceneGraph + SteeringPlanner + ?Sized,
{
    let Some(player) = ctx.player else {
        return;
    };
    host.set_seek_target(player.position);

    let mut updates: Vec<(Entity, AiState, AggroDecision, VehicleHandle)> = Vec::new();
    {
        let mut query = store.query::<(&Enemy, &AiAgent, &Transform, &AiState)>();
        for (entity, (_enemy, agent, transform, state)) in query.iter() {
            if state.is_dead() {
                continue;
            }
            let distance = host.world_position(transform.node).distance(player.position);
            let decision =
                evaluate_aggro(*state, distance, config.aggro_radius, player.alive);
            updates.push((entity, *state, decision, agent.vehicle));
        }
    }

    for (entity, previous, decision, vehicle) in updates {
        if let Some(mut enemy) = store.get_mut::<Enemy>(entity) {
            enemy.is_aggro = decision.is_aggro;
        }
        if decision.state != previous {
            if let Some(mut state) = store.get_mut::<AiState>(entity) {
                *state = decision.state;
            }
            debug!("{entity:?}: {previous:?} -> {:?} (aggro)", decision.state);
            events.push(GameEvent::EnemyStateChanged {
                entity: entity_id(entity),
                from: previous,
                to: decision.state,
            });
        }
        reconcile_behaviors(host, vehicle, decision.state);
    }
}

/// Make a vehicle's behavior list match `state`.
///
/// Clears and re-adds only when membership differs, so planner-side behavior
/// state survives steady frames. Returns whether the list was rebuilt.
pub fn reconcile_behaviors<P: SteeringPlanner + ?Sized>(
    planner: &mut P,
    vehicle: VehicleHandle,
    state: AiState,
) -> bool {
    let desired = desired_behaviors(state);
    if !needs_swap(planner.behaviors(vehicle), desired) {
        return false;
    }
    planner.clear_behaviors(vehicle);
    for behavior in desired {
        planner.add_behavior(vehicle, *behavior);
    }
    true
}
