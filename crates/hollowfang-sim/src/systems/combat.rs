//! Combat system: player weapon swings, enemy attack decisions, hit resolution.
//!
//! Starting an attack never applies damage directly. It spawns a dedicated
//! timer entity carrying a `PendingAction`; the timer system resolves the hit
//! later against whatever the world looks like by then.

use hecs::Entity;
use log::debug;

use hollowfang_core::components::*;
use hollowfang_core::enums::{AiState, WeaponState};
use hollowfang_core::events::GameEvent;
use hollowfang_core::types::{EntityId, MeshId};

use hollowfang_ai::fsm::{evaluate, resolve_hit, EnemyContext};

use crate::collaborators::{PhysicsWorld, SceneGraph, SteeringPlanner};
use crate::config::SimConfig;
use crate::context::FrameContext;
use crate::registry::MeshRegistry;
use crate::store::{entity_id, EntityStore};
use crate::systems::{position_of, vitals};

/// Start a swing if the weapon is off cooldown.
///
/// Requires attack intent on the entity's `Input` and a living wielder.
/// Returns whether a swing started.
pub fn try_swing(
    store: &mut EntityStore,
    entity: Entity,
    now: f64,
    config: &SimConfig,
    events: &mut Vec<GameEvent>,
) -> bool {
    let intent = store
        .get::<Input>(entity)
        .is_some_and(|input| input.is_attacking);
    let alive = store
        .get::<Health>(entity)
        .map_or(true, |health| !health.is_depleted());
    if !intent || !alive {
        return false;
    }

    let animated = {
        let Some(mut weapon) = store.get_mut::<Weapon>(entity) else {
            return false;
        };
        if let Some(last) = weapon.last_attack_time {
            if now - last <= weapon.cooldown {
                return false;
            }
        }
        weapon.last_attack_time = Some(now);
        weapon.state = WeaponState::Swinging;
        weapon.has_swing_animation
    };

    let id = entity_id(entity);
    events.push(GameEvent::SwingStarted {
        entity: id,
        animated,
    });
    store.create((Timer::new(
        config.player_damage_delay,
        PendingAction::PlayerWeaponHit { attacker: id },
        "player_weapon_hit",
    ),));
    if !animated {
        store.create((Timer::new(
            config.swing_fallback_secs,
            PendingAction::EndSwing {
                entity: id,
                started: now,
            },
            "swing_fallback",
        ),));
    }
    debug!("{entity:?} swings at t={now:.3}");
    true
}

/// Return a swinging weapon to idle. No-op for anything not swinging.
pub fn finish_swing(store: &mut EntityStore, entity: Entity, events: &mut Vec<GameEvent>) -> bool {
    let Some(mut weapon) = store.get_mut::<Weapon>(entity) else {
        return false;
    };
    if weapon.state != WeaponState::Swinging {
        return false;
    }
    weapon.state = WeaponState::Idle;
    events.push(GameEvent::SwingEnded {
        entity: entity_id(entity),
    });
    true
}

/// End the swing that began at `started`, if it is still the current one.
///
/// A later swing restarts `last_attack_time`, so an older fallback timer
/// leaves it running.
pub fn end_swing_started_at(
    store: &mut EntityStore,
    entity: Entity,
    started: f64,
    events: &mut Vec<GameEvent>,
) -> bool {
    let current = store
        .get::<Weapon>(entity)
        .is_some_and(|weapon| weapon.last_attack_time == Some(started));
    if !current {
        debug!("{entity:?}: stale swing fallback from t={started:.3}");
        return false;
    }
    finish_swing(store, entity, events)
}

/// Feed this frame's attack intent to the player's weapon.
pub fn run_player_weapon(
    store: &mut EntityStore,
    ctx: &FrameContext,
    config: &SimConfig,
    events: &mut Vec<GameEvent>,
) {
    let Some(player) = ctx.player else {
        return;
    };
    try_swing(store, player.entity, ctx.now, config, events);
}

/// Advance enemy attack cooldowns and run the combat FSM for every living enemy.
pub fn run_enemies<H>(
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

    struct Pending {
        entity: Entity,
        previous: AiState,
        elapsed: f64,
        new_state: AiState,
        state_changed: bool,
        begin_attack: bool,
        hit_delay: f64,
    }

    let mut updates: Vec<Pending> = Vec::new();
    {
        let mut query = store.query::<(&Enemy, &Transform, &AiState, &Combat, &Health)>();
        for (entity, (_enemy, transform, state, combat, health)) in query.iter() {
            if state.is_dead() {
                continue;
            }
            let distance = host.world_position(transform.node).distance(player.position);
            let elapsed = combat.last_attack_time + ctx.dt;
            let update = evaluate(&EnemyContext {
                state: *state,
                health: health.current,
                player_alive: player.alive,
                distance_to_player: distance,
                attack_range: combat.range,
                cooldown_elapsed: elapsed,
                cooldown: combat.cooldown,
            });
            updates.push(Pending {
                entity,
                previous: *state,
                elapsed,
                new_state: update.new_state,
                state_changed: update.state_changed,
                begin_attack: update.begin_attack,
                hit_delay: combat.attack_duration * config.enemy_hit_fraction,
            });
        }
    }

    for update in updates {
        let entity = update.entity;
        if let Some(mut combat) = store.get_mut::<Combat>(entity) {
            combat.last_attack_time = if update.begin_attack {
                0.0
            } else {
                update.elapsed
            };
        }

        if update.new_state == AiState::Dead {
            vitals::mark_enemy_dead(store, host, entity, events);
            continue;
        }

        if update.state_changed {
            if let Some(mut state) = store.get_mut::<AiState>(entity) {
                *state = update.new_state;
            }
            debug!("{entity:?}: {:?} -> {:?}", update.previous, update.new_state);
            events.push(GameEvent::EnemyStateChanged {
                entity: entity_id(entity),
                from: update.previous,
                to: update.new_state,
            });
        }

        if !player.alive {
            if let Some(mut enemy) = store.get_mut::<Enemy>(entity) {
                enemy.is_aggro = false;
            }
        }

        if update.begin_attack {
            store.create((Timer::new(
                update.hit_delay,
                PendingAction::EnemyAttackHit {
                    attacker: entity_id(entity),
                    target: entity_id(player.entity),
                },
                "enemy_attack_hit",
            ),));
        }
    }
}

/// Apply clamped damage from `source` to `target`.
///
/// A lethal hit on an enemy marks it `Dead` on the spot, so attacks it still
/// has in flight resolve against a dead attacker. Returns the damage actually
/// taken, or `None` when the target has no health or is already at zero.
pub fn apply_damage<P: SteeringPlanner + ?Sized>(
    store: &mut EntityStore,
    planner: &mut P,
    source: Entity,
    target: Entity,
    amount: f32,
    events: &mut Vec<GameEvent>,
) -> Option<f32> {
    let (taken, remaining) = {
        let mut health = store.get_mut::<Health>(target)?;
        if health.is_depleted() {
            return None;
        }
        let taken = health.apply_damage(amount);
        (taken, health.current)
    };

    debug!("{source:?} hits {target:?} for {taken} ({remaining} left)");
    events.push(GameEvent::DamageApplied {
        source: entity_id(source),
        target: entity_id(target),
        amount: taken,
        remaining,
    });
    if remaining <= 0.0 && store.has::<Enemy>(target) {
        vitals::mark_enemy_dead(store, planner, target, events);
    }
    Some(taken)
}

/// Resolve a player weapon hit with a camera raycast.
///
/// The ray is bounded by the weapon's range and only considers meshes that
/// resolve to some other entity with `Health`. Returns the entity hit.
pub fn resolve_player_hit<H>(
    store: &mut EntityStore,
    host: &mut H,
    registry: &MeshRegistry,
    attacker: EntityId,
    events: &mut Vec<GameEvent>,
) -> Option<Entity>
where
    H: PhysicsWorld + SceneGraph + SteeringPlanner + ?Sized,
{
    let attacker = store.resolve(attacker)?;
    if store
        .get::<Health>(attacker)
        .is_some_and(|health| health.is_depleted())
    {
        return None;
    }
    let camera = store.get::<Player>(attacker)?.camera;
    let (damage, range) = {
        let weapon = store.get::<Weapon>(attacker)?;
        (weapon.damage, weapon.range)
    };

    let target = {
        let host: &H = host;
        let ray = host.camera_ray(camera);
        let store_ref: &EntityStore = store;
        let mut filter = |mesh: MeshId| {
            registry
                .resolve(mesh, host)
                .is_some_and(|entity| entity != attacker && store_ref.has::<Health>(entity))
        };
        let hit = host.cast_ray(&ray, range, &mut filter)?;
        registry.resolve(hit.mesh, host)?
    };

    apply_damage(store, host, attacker, target, damage, events)?;
    Some(target)
}

/// Land (or drop) a scheduled enemy attack.
///
/// A missing, dead or depleted attacker does nothing; a depleted one is
/// marked `Dead` here. Otherwise an attacking enemy
/// returns to `Chase`, and the target takes damage only while alive and
/// within reach plus the configured buffer.
pub fn resolve_enemy_hit<H: SceneGraph + SteeringPlanner + ?Sized>(
    store: &mut EntityStore,
    host: &mut H,
    attacker: EntityId,
    target: EntityId,
    config: &SimConfig,
    events: &mut Vec<GameEvent>,
) {
    let Some(attacker) = store.resolve(attacker) else {
        return;
    };
    let Some(state) = store.get::<AiState>(attacker).map(|state| *state) else {
        return;
    };
    let depleted = store
        .get::<Health>(attacker)
        .is_some_and(|health| health.is_depleted());
    if depleted {
        vitals::mark_enemy_dead(store, host, attacker, events);
        debug!("{attacker:?} died before its attack landed");
        return;
    }
    let Some((range, damage)) = store
        .get::<Combat>(attacker)
        .map(|combat| (combat.range, combat.damage))
    else {
        return;
    };

    let target = store.resolve(target);
    let (distance, target_alive) = match target {
        Some(target) => {
            let scene: &H = host;
            let distance = position_of(store, scene, attacker)
                .zip(position_of(store, scene, target))
                .map_or(f32::INFINITY, |(a, b)| a.distance(b));
            let alive = store
                .get::<Health>(target)
                .is_some_and(|health| !health.is_depleted());
            (distance, alive)
        }
        None => (f32::INFINITY, false),
    };

    let resolution = resolve_hit(
        state,
        distance,
        range,
        config.attack_range_buffer,
        target_alive,
    );

    if let Some(next) = resolution.next_state {
        if let Some(mut current) = store.get_mut::<AiState>(attacker) {
            *current = next;
        }
        events.push(GameEvent::EnemyStateChanged {
            entity: entity_id(attacker),
            from: state,
            to: next,
        });
    }

    match target {
        Some(target) if resolution.land_hit => {
            apply_damage(store, host, attacker, target, damage, events);
        }
        _ if !state.is_dead() => debug!("{attacker:?} attack missed at distance {distance:.2}"),
        _ => {}
    }
}
