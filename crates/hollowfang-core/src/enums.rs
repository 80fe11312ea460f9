//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Per-enemy behavior state.
///
/// `Dead` is terminal: no transition ever leaves it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Idle,
    Chase,
    Attack,
    Dead,
}

impl AiState {
    /// Whether the enemy is actively engaged with the player.
    pub fn is_engaged(self) -> bool {
        matches!(self, AiState::Chase | AiState::Attack)
    }

    pub fn is_dead(self) -> bool {
        self == AiState::Dead
    }
}

/// Player weapon state machine: `Idle -> Swinging -> Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponState {
    #[default]
    Idle,
    Swinging,
}

/// Enemy archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Spider,
}

/// Steering behaviors the planner knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteeringBehavior {
    /// Move toward the shared seek target (the player).
    Seek,
    /// Random walk.
    Wander,
}

/// Animation clip selected for an entity this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationClip {
    #[default]
    Idle,
    Walk,
    Run,
    Jump,
    Crouch,
    Attack,
    Death,
}
