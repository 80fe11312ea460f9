//! Simulation engine: the per-frame entry point.
//!
//! `SimulationEngine` owns the entity store, the mesh registry and the
//! simulation clock, runs every system once per frame in a fixed order, and
//! returns a `FrameSnapshot`. The host collaborators are borrowed for the
//! duration of a tick only, so the engine runs the same against a game client
//! or the headless reference host.

use hecs::Entity;
use log::{debug, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hollowfang_core::components::{Health, Input, Player, Stamina, WorldState};
use hollowfang_core::enums::EnemyKind;
use hollowfang_core::events::GameEvent;
use hollowfang_core::state::FrameSnapshot;
use hollowfang_core::types::SimTime;

use crate::collaborators::{Host, SceneGraph};
use crate::config::SimConfig;
use crate::context::FrameContext;
use crate::registry::MeshRegistry;
use crate::store::{EntityStore, StoreError};
use crate::systems;
use crate::world_setup::{self, ActorHandles, SetupError};

/// The simulation engine. Owns the entity store and all sim state.
pub struct SimulationEngine {
    store: EntityStore,
    registry: MeshRegistry,
    config: SimConfig,
    time: SimTime,
    rng: ChaCha8Rng,
    /// Events raised between ticks (swing notifications), flushed with the next snapshot.
    events: Vec<GameEvent>,
    player_down: bool,
}

impl SimulationEngine {
    /// Create an empty engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            store: EntityStore::new(),
            registry: MeshRegistry::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            time: SimTime::default(),
            events: Vec::new(),
            player_down: false,
        }
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    ///
    /// Order: context -> steering -> kinematics -> combat -> vitals ->
    /// fight mode -> timers -> sensor -> animation. A non-positive or
    /// non-finite `dt` skips every system and leaves the clock alone.
    pub fn tick<H: Host + ?Sized>(&mut self, dt: f64, host: &mut H) -> FrameSnapshot {
        if !(dt.is_finite() && dt > 0.0) {
            warn!("Skipping frame with invalid dt {dt}");
            return self.snapshot(&*host);
        }

        let now = self.time.elapsed_secs + dt;
        let ctx = FrameContext::resolve(&self.store, &*host, dt, now);
        if ctx.player.is_none() {
            debug!("No player yet; frame {} runs without one", self.time.tick);
        }

        systems::steering::run(&mut self.store, host, &ctx, &self.config, &mut self.events);
        systems::kinematics::run(&self.store, host, &ctx);
        systems::combat::run_player_weapon(&mut self.store, &ctx, &self.config, &mut self.events);
        systems::combat::run_enemies(&mut self.store, host, &ctx, &self.config, &mut self.events);
        systems::vitals::run(
            &mut self.store,
            host,
            &ctx,
            &self.config,
            &mut self.events,
            &mut self.player_down,
        );
        systems::world_state::run(&mut self.store, &ctx, &mut self.events);
        systems::timers::run(
            &mut self.store,
            host,
            &self.registry,
            &ctx,
            &self.config,
            &mut self.events,
        );
        systems::sensor::run(&mut self.store, &*host, &self.registry, &mut self.events);
        systems::animation::run(&mut self.store, &*host, &self.config, &mut self.events);

        self.time.advance(dt);
        self.snapshot(&*host)
    }

    /// Replace an entity's input for the next tick.
    pub fn set_input(&mut self, entity: Entity, input: Input) -> Result<(), StoreError> {
        self.store.add_component(entity, input)
    }

    /// Report that the swing animation of `entity` finished.
    ///
    /// Returns the weapon to idle if it is swinging; otherwise ignored.
    pub fn notify_swing_finished(&mut self, entity: Entity) -> bool {
        let finished = systems::combat::finish_swing(&mut self.store, entity, &mut self.events);
        if !finished {
            warn!("Ignoring swing-finished for {entity:?}: no swing in progress");
        }
        finished
    }

    pub fn spawn_world_state(&mut self) -> Result<Entity, SetupError> {
        world_setup::spawn_world_state(&mut self.store)
    }

    pub fn spawn_player(&mut self, handles: &ActorHandles) -> Result<Entity, SetupError> {
        world_setup::spawn_player(&mut self.store, &mut self.registry, handles, &self.config)
    }

    pub fn spawn_enemy(
        &mut self,
        kind: EnemyKind,
        handles: &ActorHandles,
    ) -> Result<Entity, SetupError> {
        world_setup::spawn_enemy(&mut self.store, &mut self.registry, kind, handles)
    }

    /// Player health as `(current, max)`, for the HUD.
    pub fn player_health(&self) -> Option<(f32, f32)> {
        let player = self.store.first::<Player>()?;
        let health = self.store.get::<Health>(player)?;
        Some((health.current, health.max))
    }

    /// Player stamina as `(current, max)`, for the HUD.
    pub fn player_stamina(&self) -> Option<(f32, f32)> {
        let player = self.store.first::<Player>()?;
        let stamina = self.store.get::<Stamina>(player)?;
        Some((stamina.current, stamina.max))
    }

    pub fn is_in_fight_mode(&self) -> bool {
        self.store
            .first::<WorldState>()
            .and_then(|entity| self.store.get::<WorldState>(entity).map(|ws| ws.is_in_fight_mode))
            .unwrap_or(false)
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    pub fn registry(&self) -> &MeshRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut MeshRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Seeded RNG for spawn placement.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    fn snapshot<S: SceneGraph + ?Sized>(&mut self, scene: &S) -> FrameSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.store, scene, &self.time, events)
    }
}
