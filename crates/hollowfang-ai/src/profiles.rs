//! Archetype-specific tuning profiles.
//!
//! Consolidates per-archetype parameters used by entity assembly and the FSM.

use hollowfang_core::enums::EnemyKind;

/// Tuning profile for an enemy archetype.
#[derive(Debug, Clone, Copy)]
pub struct EnemyProfile {
    pub max_health: f32,
    /// Damage dealt per landed attack.
    pub damage: f32,
    /// Reach at which an attack may start (m).
    pub attack_range: f32,
    /// Seconds that must accumulate between attacks.
    pub attack_cooldown: f64,
    /// Length of the attack motion (s). The hit lands partway through.
    pub attack_duration: f64,
    /// Top speed the steering vehicle is allowed (m/s).
    pub max_speed: f32,
    /// Collider radius (m).
    pub body_radius: f32,
}

/// Get the tuning profile for a given archetype.
pub fn get_profile(kind: EnemyKind) -> EnemyProfile {
    use hollowfang_core::constants::*;

    match kind {
        EnemyKind::Spider => EnemyProfile {
            max_health: SPIDER_MAX_HEALTH,
            damage: SPIDER_DAMAGE,
            attack_range: SPIDER_ATTACK_RANGE,
            attack_cooldown: SPIDER_ATTACK_COOLDOWN,
            attack_duration: SPIDER_ATTACK_DURATION,
            max_speed: SPIDER_MAX_SPEED,
            body_radius: SPIDER_BODY_RADIUS,
        },
    }
}
