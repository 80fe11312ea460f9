//! Enemy behavior finite state machine.
//!
//! Pure functions that compute state transitions for enemy entities:
//! `Idle <-> Chase -> Attack -> Chase`, with `Dead` reachable from any state
//! and terminal. No ECS dependency: operates on plain data.

use hollowfang_core::enums::AiState;

/// Result of the per-frame aggro decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggroDecision {
    pub state: AiState,
    pub is_aggro: bool,
}

/// Decide whether an enemy pursues the player this frame.
///
/// Dead is checked first and never left. Inside the aggro radius an enemy
/// chases, keeping an attack that is already in progress; outside it idles.
/// A dead player disengages everyone.
pub fn evaluate_aggro(
    state: AiState,
    distance_to_player: f32,
    aggro_radius: f32,
    player_alive: bool,
) -> AggroDecision {
    if state.is_dead() {
        return AggroDecision {
            state,
            is_aggro: false,
        };
    }

    if player_alive && distance_to_player < aggro_radius {
        let state = if state == AiState::Attack {
            AiState::Attack
        } else {
            AiState::Chase
        };
        AggroDecision {
            state,
            is_aggro: true,
        }
    } else {
        AggroDecision {
            state: AiState::Idle,
            is_aggro: false,
        }
    }
}

/// Input to the combat FSM for a single enemy.
pub struct EnemyContext {
    pub state: AiState,
    pub health: f32,
    pub player_alive: bool,
    pub distance_to_player: f32,
    pub attack_range: f32,
    /// Seconds accumulated since the last attack.
    pub cooldown_elapsed: f64,
    pub cooldown: f64,
}

/// Output from the combat FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyUpdate {
    pub new_state: AiState,
    pub state_changed: bool,
    /// An attack starts this frame: reset the cooldown and schedule the hit.
    pub begin_attack: bool,
}

/// Evaluate the combat FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    let no_change = EnemyUpdate {
        new_state: ctx.state,
        state_changed: false,
        begin_attack: false,
    };

    // Dead is terminal
    if ctx.state.is_dead() {
        return no_change;
    }

    if ctx.health <= 0.0 {
        return transition(ctx.state, AiState::Dead, false);
    }

    if !ctx.player_alive {
        return transition(ctx.state, AiState::Idle, false);
    }

    match ctx.state {
        AiState::Chase => evaluate_chase(ctx),
        AiState::Idle | AiState::Attack | AiState::Dead => no_change,
    }
}

fn evaluate_chase(ctx: &EnemyContext) -> EnemyUpdate {
    let in_range = ctx.distance_to_player <= ctx.attack_range;
    let cooled_down = ctx.cooldown_elapsed >= ctx.cooldown;

    if in_range && cooled_down {
        return transition(ctx.state, AiState::Attack, true);
    }

    EnemyUpdate {
        new_state: ctx.state,
        state_changed: false,
        begin_attack: false,
    }
}

fn transition(from: AiState, to: AiState, begin_attack: bool) -> EnemyUpdate {
    EnemyUpdate {
        new_state: to,
        state_changed: from != to,
        begin_attack,
    }
}

/// How a scheduled enemy hit resolves when its timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitResolution {
    /// Apply the attacker's damage to the target.
    pub land_hit: bool,
    /// State the attacker moves to, if any.
    pub next_state: Option<AiState>,
}

/// Re-validate an enemy attack at the moment it lands.
///
/// A dead attacker does nothing. Otherwise an attacking enemy returns to
/// `Chase`, and the hit lands only if the target is alive and still within
/// `attack_range + buffer`.
pub fn resolve_hit(
    attacker_state: AiState,
    distance_to_target: f32,
    attack_range: f32,
    buffer: f32,
    target_alive: bool,
) -> HitResolution {
    if attacker_state.is_dead() {
        return HitResolution {
            land_hit: false,
            next_state: None,
        };
    }

    // Only an attack in progress returns to the chase; an enemy that lost
    // aggro meanwhile stays where the orchestrator put it.
    let next_state = (attacker_state == AiState::Attack).then_some(AiState::Chase);

    HitResolution {
        land_hit: target_alive && distance_to_target <= attack_range + buffer,
        next_state,
    }
}
