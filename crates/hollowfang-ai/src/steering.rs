//! Steering-behavior policy: which behaviors a vehicle should run for a given state.
//!
//! The force math lives in the host's planner; this module only decides
//! membership of the active behavior list.

use hollowfang_core::enums::{AiState, SteeringBehavior};

const SEEK: &[SteeringBehavior] = &[SteeringBehavior::Seek];
const WANDER: &[SteeringBehavior] = &[SteeringBehavior::Wander];

/// Behavior list a vehicle in `state` should be running.
///
/// Engaged enemies seek the player, dead ones run nothing, everything else wanders.
pub fn desired_behaviors(state: AiState) -> &'static [SteeringBehavior] {
    match state {
        AiState::Chase | AiState::Attack => SEEK,
        AiState::Idle => WANDER,
        AiState::Dead => &[],
    }
}

/// Whether `current` must be cleared and replaced to match `desired`.
///
/// Returns false when the sets already agree, so per-behavior state
/// (wander's random-walk target) survives frames where nothing changed.
pub fn needs_swap(current: &[SteeringBehavior], desired: &[SteeringBehavior]) -> bool {
    current.len() != desired.len() || desired.iter().any(|b| !current.contains(b))
}
