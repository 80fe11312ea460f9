//! ECS components for simulation entities.
//!
//! Components are plain data. Game logic lives in systems; the only methods
//! here are the clamping mutators that keep `0 <= current <= max`.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::*;

/// Authoritative collider/body node. Its world position is ground truth.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub node: NodeHandle,
}

/// Renderable child node plus a fixed rotation correcting the asset's forward axis.
///
/// Kept apart from `Transform` so the physics rotation can stay locked while
/// the visual still yaws toward its motion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Visual {
    pub node: NodeHandle,
    pub rotation_offset: Quat,
}

/// Rigid body handle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Physics {
    pub body: BodyHandle,
}

/// Steering vehicle handle. Position and velocity live in the planner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AiAgent {
    pub vehicle: VehicleHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Subtract `amount` and clamp. Returns the damage actually taken.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current - amount).clamp(0.0, self.max);
        before - self.current
    }

    pub fn clamp(&mut self) {
        self.current = self.current.clamp(0.0, self.max);
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
}

impl Stamina {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Add `delta` (negative to spend) and clamp.
    pub fn adjust(&mut self, delta: f32) {
        self.current = (self.current + delta).clamp(0.0, self.max);
    }

    pub fn clamp(&mut self) {
        self.current = self.current.clamp(0.0, self.max);
    }
}

/// Enemy attack timing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Combat {
    pub damage: f32,
    pub range: f32,
    pub cooldown: f64,
    /// Simulated seconds accumulated since the last attack. Counts up toward `cooldown`.
    pub last_attack_time: f64,
    pub attack_duration: f64,
}

/// Player weapon timing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weapon {
    pub damage: f32,
    pub range: f32,
    pub cooldown: f64,
    /// Simulation-clock time of the last accepted swing.
    pub last_attack_time: Option<f64>,
    pub state: WeaponState,
    /// Whether a swing animation reports completion; otherwise a fallback timer ends the swing.
    pub has_swing_animation: bool,
}

/// Per-frame intent snapshot. Overwritten by the host every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Input {
    /// World-space move direction; roughly unit length when moving.
    pub move_dir: Vec3,
    pub is_jumping: bool,
    pub is_crouching: bool,
    pub is_sprinting: bool,
    pub is_attacking: bool,
}

/// Speeds for input-driven bodies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Locomotion {
    pub walk_speed: f32,
    pub sprint_multiplier: f32,
    pub jump_velocity: f32,
}

/// Interaction data attached to a scene node (doors, chests, signs...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractionMetadata {
    pub id: u32,
    pub prompt: String,
}

/// What a sensor ray resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SensorTarget {
    Entity { entity: EntityId },
    Interactable { metadata: InteractionMetadata },
}

/// Transient raycast result, cleared and recomputed every update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sensor {
    pub check_range: f32,
    pub hit_entity: Option<EntityId>,
    pub hit_distance: Option<f32>,
    pub hit_point: Option<Vec3>,
    pub hit_metadata: Option<InteractionMetadata>,
}

impl Sensor {
    pub fn new(check_range: f32) -> Self {
        Self {
            check_range,
            ..Default::default()
        }
    }

    /// Drop every field of the previous result, keeping the range.
    pub fn reset(&mut self) {
        *self = Self::new(self.check_range);
    }

    /// Identity of the current hit, used to detect target changes.
    pub fn target(&self) -> Option<SensorTarget> {
        if let Some(entity) = self.hit_entity {
            return Some(SensorTarget::Entity { entity });
        }
        self.hit_metadata
            .clone()
            .map(|metadata| SensorTarget::Interactable { metadata })
    }
}

/// Deferred work resolved by the timer dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PendingAction {
    /// Resolve the player's weapon hit with a camera raycast.
    PlayerWeaponHit { attacker: EntityId },
    /// Land an enemy attack on its target if still valid.
    EnemyAttackHit { attacker: EntityId, target: EntityId },
    /// Return a swinging weapon to idle (no-animation fallback), provided the
    /// swing that began at `started` is still the current one.
    EndSwing { entity: EntityId, started: f64 },
}

/// Self-deleting deferred action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timer {
    pub time_remaining: f64,
    pub duration: f64,
    pub action: PendingAction,
    pub label: String,
}

impl Timer {
    pub fn new(duration: f64, action: PendingAction, label: impl Into<String>) -> Self {
        Self {
            time_remaining: duration,
            duration,
            action,
            label: label.into(),
        }
    }
}

/// World-level singleton.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WorldState {
    pub is_in_fight_mode: bool,
}

/// Marks the player entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub camera: CameraHandle,
}

/// Marks an enemy entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub is_aggro: bool,
}

/// Animation clip derived from gameplay state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AnimationState {
    pub clip: AnimationClip,
}
