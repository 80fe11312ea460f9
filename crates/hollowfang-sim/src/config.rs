//! Simulation tuning loaded from JSON.
//!
//! Every field defaults to the matching constant in `hollowfang_core::constants`,
//! so a config file only needs the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hollowfang_core::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for spawn placement. Same seed = same layout.
    pub seed: u64,
    pub aggro_radius: f32,
    /// Delay between a swing starting and its hit resolving.
    pub player_damage_delay: f64,
    /// Swing length when the weapon has no swing animation.
    pub swing_fallback_secs: f64,
    /// Fraction of an enemy's attack duration after which the hit lands.
    pub enemy_hit_fraction: f64,
    /// Extra reach allowed when an enemy hit lands.
    pub attack_range_buffer: f32,
    pub stamina_drain_per_sec: f32,
    pub stamina_regen_per_sec: f32,
    pub sensor_range: f32,
    /// Horizontal speed above which enemies play their walk clip.
    pub walk_animation_speed: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            aggro_radius: AGGRO_RADIUS,
            player_damage_delay: PLAYER_DAMAGE_DELAY,
            swing_fallback_secs: SWING_FALLBACK_SECS,
            enemy_hit_fraction: ENEMY_HIT_FRACTION,
            attack_range_buffer: ATTACK_RANGE_BUFFER,
            stamina_drain_per_sec: STAMINA_DRAIN_PER_SEC,
            stamina_regen_per_sec: STAMINA_REGEN_PER_SEC,
            sensor_range: SENSOR_RANGE,
            walk_animation_speed: WALK_ANIMATION_SPEED,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative_f32("aggro_radius", self.aggro_radius)?;
        non_negative_f64("player_damage_delay", self.player_damage_delay)?;
        non_negative_f64("swing_fallback_secs", self.swing_fallback_secs)?;
        non_negative_f32("attack_range_buffer", self.attack_range_buffer)?;
        non_negative_f32("stamina_drain_per_sec", self.stamina_drain_per_sec)?;
        non_negative_f32("stamina_regen_per_sec", self.stamina_regen_per_sec)?;
        non_negative_f32("sensor_range", self.sensor_range)?;
        non_negative_f32("walk_animation_speed", self.walk_animation_speed)?;

        if !(self.enemy_hit_fraction > 0.0 && self.enemy_hit_fraction <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "enemy_hit_fraction",
                reason: "must be in (0, 1]",
            });
        }
        Ok(())
    }
}

fn non_negative_f32(field: &'static str, value: f32) -> Result<(), ConfigError> {
    non_negative_f64(field, f64::from(value))
}

fn non_negative_f64(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be finite and non-negative",
        })
    }
}
