//! Frame snapshot: the visible state handed to the HUD after each frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::SensorTarget;
use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{EntityId, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub player: Option<PlayerView>,
    pub in_fight_mode: bool,
    pub enemies: Vec<EnemyView>,
    /// Events emitted during this frame, in emission order.
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub entity: EntityId,
    pub health: f32,
    pub max_health: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub weapon_state: WeaponState,
    /// What the player is currently looking at.
    pub target: Option<SensorTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub entity: EntityId,
    pub kind: EnemyKind,
    pub state: AiState,
    pub is_aggro: bool,
    pub health: f32,
    pub max_health: f32,
    pub position: Vec3,
}
