//! Events emitted by the simulation for presentation and HUD feedback.
//!
//! Events are fire-and-forget: the core never reads them back.

use serde::{Deserialize, Serialize};

use crate::components::SensorTarget;
use crate::enums::*;
use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Play the weapon swing. When `animated`, the host reports completion
    /// back through the engine.
    SwingStarted { entity: EntityId, animated: bool },
    /// A swing returned to idle.
    SwingEnded { entity: EntityId },
    DamageApplied {
        source: EntityId,
        target: EntityId,
        amount: f32,
        remaining: f32,
    },
    EnemyStateChanged {
        entity: EntityId,
        from: AiState,
        to: AiState,
    },
    EnemyDied { entity: EntityId },
    PlayerDied { entity: EntityId },
    FightModeChanged { in_fight: bool },
    /// The sensor owned by `entity` resolved a different target.
    TargetChanged {
        entity: EntityId,
        target: Option<SensorTarget>,
    },
    AnimationChanged { entity: EntityId, clip: AnimationClip },
}
