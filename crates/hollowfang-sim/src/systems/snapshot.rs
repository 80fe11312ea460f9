//! Snapshot system: builds a `FrameSnapshot` from the current store.

use hollowfang_core::components::*;
use hollowfang_core::enums::AiState;
use hollowfang_core::events::GameEvent;
use hollowfang_core::state::{EnemyView, FrameSnapshot, PlayerView};
use hollowfang_core::types::SimTime;

use crate::collaborators::SceneGraph;
use crate::store::{entity_id, EntityStore};

/// Build a complete frame snapshot.
pub fn build_snapshot<S: SceneGraph + ?Sized>(
    store: &EntityStore,
    scene: &S,
    time: &SimTime,
    events: Vec<GameEvent>,
) -> FrameSnapshot {
    let in_fight_mode = store
        .first::<WorldState>()
        .and_then(|entity| store.get::<WorldState>(entity).map(|state| state.is_in_fight_mode))
        .unwrap_or(false);

    FrameSnapshot {
        time: *time,
        player: build_player(store),
        in_fight_mode,
        enemies: build_enemies(store, scene),
        events,
    }
}

fn build_player(store: &EntityStore) -> Option<PlayerView> {
    let entity = store.first::<Player>()?;
    let health = store.get::<Health>(entity).map(|health| *health)?;
    let stamina = store
        .get::<Stamina>(entity)
        .map_or(Stamina::full(0.0), |stamina| *stamina);
    let weapon_state = store
        .get::<Weapon>(entity)
        .map(|weapon| weapon.state)
        .unwrap_or_default();
    let target = store.get::<Sensor>(entity).and_then(|sensor| sensor.target());

    Some(PlayerView {
        entity: entity_id(entity),
        health: health.current,
        max_health: health.max,
        stamina: stamina.current,
        max_stamina: stamina.max,
        weapon_state,
        target,
    })
}

fn build_enemies<S: SceneGraph + ?Sized>(store: &EntityStore, scene: &S) -> Vec<EnemyView> {
    let mut query = store.query::<(&Enemy, &AiState, &Health, &Transform)>();
    let mut enemies: Vec<EnemyView> = query
        .iter()
        .map(|(entity, (enemy, state, health, transform))| EnemyView {
            entity: entity_id(entity),
            kind: enemy.kind,
            state: *state,
            is_aggro: enemy.is_aggro,
            health: health.current,
            max_health: health.max,
            position: scene.world_position(transform.node),
        })
        .collect();
    enemies.sort_by_key(|enemy| enemy.entity);
    enemies
}
