//! End-to-end encounter against the headless host, driven through the public API.

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hollowfang_sim::core::constants::DT;
use hollowfang_sim::core::enums::{AiState, EnemyKind};
use hollowfang_sim::core::events::GameEvent;
use hollowfang_sim::headless::HeadlessHost;
use hollowfang_sim::world_setup::scatter_positions;
use hollowfang_sim::{SimConfig, SimulationEngine};

fn spawn_pack(
    engine: &mut SimulationEngine,
    host: &mut HeadlessHost,
    count: usize,
) -> Vec<hecs::Entity> {
    let mut rng = ChaCha8Rng::seed_from_u64(engine.config().seed);
    scatter_positions(&mut rng, Vec3::new(0.0, 0.6, 0.0), count, 6.0, 12.0)
        .into_iter()
        .map(|position| {
            let rig = host.spawn_enemy_rig(EnemyKind::Spider, position);
            engine.spawn_enemy(EnemyKind::Spider, &rig).unwrap()
        })
        .collect()
}

#[test]
fn test_spider_pack_closes_in_and_attacks() {
    let config = SimConfig::default();
    let mut host = HeadlessHost::new(config.seed);
    let mut engine = SimulationEngine::new(config);
    engine.spawn_world_state().unwrap();
    let rig = host.spawn_player_rig(Vec3::new(0.0, 0.5, 0.0));
    engine.spawn_player(&rig).unwrap();
    spawn_pack(&mut engine, &mut host, 4);

    let mut events = Vec::new();
    let mut saw_fight = false;
    for _ in 0..(10 * 60) {
        host.step_physics(DT);
        let snapshot = engine.tick(DT, &mut host);
        saw_fight |= snapshot.in_fight_mode;

        let player = snapshot.player.as_ref().unwrap();
        assert!(player.health >= 0.0 && player.health <= player.max_health);
        for enemy in &snapshot.enemies {
            assert!(enemy.health >= 0.0 && enemy.health <= enemy.max_health);
            assert!(enemy.position.y >= 0.0);
        }
        events.extend(snapshot.events);
    }

    assert!(saw_fight, "the pack never engaged");
    assert!(events
        .iter()
        .any(|event| matches!(event, GameEvent::EnemyStateChanged { to: AiState::Attack, .. })));
    let (health, max) = engine.player_health().unwrap();
    assert!(health < max, "no attack ever landed");
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut host = HeadlessHost::new(7);
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 7,
        ..Default::default()
    });
    engine.spawn_world_state().unwrap();
    let rig = host.spawn_player_rig(Vec3::new(0.0, 0.5, 0.0));
    engine.spawn_player(&rig).unwrap();
    spawn_pack(&mut engine, &mut host, 3);

    let snapshot = engine.tick(DT, &mut host);
    let json = serde_json::to_string(&snapshot).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["enemies"].as_array().unwrap().len(), 3);
    assert!(value["player"]["health"].is_number());
}

#[test]
fn test_scatter_is_seeded() {
    let mut a = ChaCha8Rng::seed_from_u64(11);
    let mut b = ChaCha8Rng::seed_from_u64(11);
    let center = Vec3::new(1.0, 0.6, -2.0);
    let first = scatter_positions(&mut a, center, 5, 6.0, 12.0);
    let second = scatter_positions(&mut b, center, 5, 6.0, 12.0);
    assert_eq!(first, second);
    for position in first {
        let offset = position - center;
        let radius = offset.x.hypot(offset.z);
        assert!(radius > 5.999 && radius < 12.001, "radius {radius}");
        assert_eq!(position.y, center.y);
    }
}
