//! Scripted encounter: one player against a spider pack on open ground.
//!
//! The player stands still, keeps its camera on the nearest living spider and
//! swings whenever its sensor is resting on an enemy.

use anyhow::{Context, Result};
use glam::Vec3;
use hecs::Entity;
use log::info;

use hollowfang_core::components::{Input, SensorTarget};
use hollowfang_core::enums::{AiState, EnemyKind};
use hollowfang_core::state::FrameSnapshot;
use hollowfang_core::types::CameraHandle;
use hollowfang_sim::headless::HeadlessHost;
use hollowfang_sim::world_setup::scatter_positions;
use hollowfang_sim::{SimConfig, SimulationEngine};

const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 0.5, 0.0);
const PACK_MIN_RADIUS: f32 = 6.0;
const PACK_MAX_RADIUS: f32 = 14.0;

pub struct Encounter {
    engine: SimulationEngine,
    host: HeadlessHost,
    player: Entity,
    camera: CameraHandle,
    last: FrameSnapshot,
}

impl Encounter {
    pub fn new(config: SimConfig, enemies: usize) -> Result<Self> {
        let mut host = HeadlessHost::new(config.seed);
        let mut engine = SimulationEngine::new(config);

        engine
            .spawn_world_state()
            .context("spawning world state")?;
        let rig = host.spawn_player_rig(PLAYER_SPAWN);
        let camera = rig.camera.context("player rig has no camera")?;
        let player = engine.spawn_player(&rig).context("spawning player")?;

        let center = Vec3::new(PLAYER_SPAWN.x, 0.0, PLAYER_SPAWN.z);
        let positions = scatter_positions(
            engine.rng_mut(),
            center,
            enemies,
            PACK_MIN_RADIUS,
            PACK_MAX_RADIUS,
        );
        for position in positions {
            let rig = host.spawn_enemy_rig(EnemyKind::Spider, position + Vec3::Y * 0.6);
            engine
                .spawn_enemy(EnemyKind::Spider, &rig)
                .context("spawning spider")?;
        }
        info!("Encounter ready: 1 player, {enemies} spiders");

        Ok(Self {
            engine,
            host,
            player,
            camera,
            last: FrameSnapshot::default(),
        })
    }

    /// Drive the player from the previous snapshot, step physics, then tick.
    pub fn step(&mut self, dt: f64) -> Result<&FrameSnapshot> {
        let input = self.script_player();
        self.engine
            .set_input(self.player, input)
            .context("player entity vanished")?;
        self.host.step_physics(dt);
        self.last = self.engine.tick(dt, &mut self.host);
        Ok(&self.last)
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    /// Snapshot from the most recent step.
    pub fn last(&self) -> &FrameSnapshot {
        &self.last
    }

    fn script_player(&mut self) -> Input {
        let nearest = self
            .last
            .enemies
            .iter()
            .filter(|enemy| enemy.state != AiState::Dead)
            .min_by(|a, b| {
                let da = a.position.distance_squared(PLAYER_SPAWN);
                let db = b.position.distance_squared(PLAYER_SPAWN);
                da.total_cmp(&db)
            });
        if let Some(enemy) = nearest {
            self.host.look_at(self.camera, enemy.position);
        }

        let on_enemy = self.last.player.as_ref().is_some_and(|player| {
            matches!(player.target, Some(SensorTarget::Entity { .. }))
        });
        Input {
            is_attacking: on_enemy,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hollowfang_core::constants::DT;

    #[test]
    fn test_player_fights_back() {
        let mut encounter = Encounter::new(SimConfig::default(), 2).unwrap();
        let mut damage_dealt = 0.0;
        for _ in 0..(20 * 60) {
            let snapshot = encounter.step(DT).unwrap();
            damage_dealt = snapshot
                .enemies
                .iter()
                .map(|enemy| enemy.max_health - enemy.health)
                .sum::<f32>();
        }
        assert!(damage_dealt > 0.0, "player never landed a hit");
    }

    #[test]
    fn test_zero_enemies_is_quiet() {
        let mut encounter = Encounter::new(SimConfig::default(), 0).unwrap();
        for _ in 0..60 {
            let snapshot = encounter.step(DT).unwrap();
            assert!(!snapshot.in_fight_mode);
        }
        assert_eq!(encounter.engine().player_health(), Some((100.0, 100.0)));
    }
}
