#[cfg(test)]
mod tests {
    use hollowfang_core::constants::*;
    use hollowfang_core::enums::{AiState, EnemyKind, SteeringBehavior};

    use crate::fsm::{evaluate, evaluate_aggro, resolve_hit, EnemyContext};
    use crate::profiles::get_profile;
    use crate::steering::{desired_behaviors, needs_swap};

    fn make_context(state: AiState, distance: f32, cooldown_elapsed: f64) -> EnemyContext {
        EnemyContext {
            state,
            health: SPIDER_MAX_HEALTH,
            player_alive: true,
            distance_to_player: distance,
            attack_range: SPIDER_ATTACK_RANGE,
            cooldown_elapsed,
            cooldown: SPIDER_ATTACK_COOLDOWN,
        }
    }

    // ---- Aggro ----

    #[test]
    fn test_idle_enemy_within_radius_chases() {
        let decision = evaluate_aggro(AiState::Idle, 5.0, 20.0, true);
        assert_eq!(decision.state, AiState::Chase);
        assert!(decision.is_aggro);
    }

    #[test]
    fn test_chasing_enemy_outside_radius_idles() {
        let decision = evaluate_aggro(AiState::Chase, 25.0, 20.0, true);
        assert_eq!(decision.state, AiState::Idle);
        assert!(!decision.is_aggro);
    }

    #[test]
    fn test_aggro_boundary_is_exclusive() {
        let decision = evaluate_aggro(AiState::Idle, 20.0, 20.0, true);
        assert_eq!(decision.state, AiState::Idle);
    }

    #[test]
    fn test_attack_in_progress_survives_aggro_pass() {
        let decision = evaluate_aggro(AiState::Attack, 1.0, 20.0, true);
        assert_eq!(decision.state, AiState::Attack);
        assert!(decision.is_aggro);
    }

    #[test]
    fn test_dead_enemy_never_reaggros() {
        for distance in [0.5, 5.0, 50.0] {
            let decision = evaluate_aggro(AiState::Dead, distance, 20.0, true);
            assert_eq!(decision.state, AiState::Dead);
            assert!(!decision.is_aggro);
        }
    }

    #[test]
    fn test_dead_player_disengages_everyone() {
        let decision = evaluate_aggro(AiState::Attack, 1.0, 20.0, false);
        assert_eq!(decision.state, AiState::Idle);
        assert!(!decision.is_aggro);
    }

    // ---- Combat FSM ----

    #[test]
    fn test_chase_in_range_with_cooldown_attacks() {
        let ctx = make_context(AiState::Chase, SPIDER_ATTACK_RANGE - 0.1, SPIDER_ATTACK_COOLDOWN);
        let update = evaluate(&ctx);
        assert!(update.state_changed);
        assert!(update.begin_attack);
        assert_eq!(update.new_state, AiState::Attack);
    }

    #[test]
    fn test_chase_in_range_cooling_down_waits() {
        let ctx = make_context(AiState::Chase, 1.0, SPIDER_ATTACK_COOLDOWN - 0.01);
        let update = evaluate(&ctx);
        assert!(!update.state_changed);
        assert!(!update.begin_attack);
        assert_eq!(update.new_state, AiState::Chase);
    }

    #[test]
    fn test_chase_out_of_range_keeps_chasing() {
        let ctx = make_context(AiState::Chase, SPIDER_ATTACK_RANGE + 1.0, 10.0);
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, AiState::Chase);
        assert!(!update.begin_attack);
    }

    #[test]
    fn test_idle_never_attacks_directly() {
        let ctx = make_context(AiState::Idle, 0.5, 10.0);
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, AiState::Idle);
        assert!(!update.begin_attack);
    }

    #[test]
    fn test_depleted_health_kills_from_any_state() {
        for state in [AiState::Idle, AiState::Chase, AiState::Attack] {
            let mut ctx = make_context(state, 1.0, 10.0);
            ctx.health = 0.0;
            let update = evaluate(&ctx);
            assert_eq!(update.new_state, AiState::Dead, "{state:?} should die");
            assert!(update.state_changed);
            assert!(!update.begin_attack);
        }
    }

    #[test]
    fn test_dead_is_terminal_in_fsm() {
        let mut ctx = make_context(AiState::Dead, 0.5, 10.0);
        ctx.health = SPIDER_MAX_HEALTH;
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, AiState::Dead);
        assert!(!update.state_changed);
    }

    #[test]
    fn test_player_death_forces_idle() {
        let mut ctx = make_context(AiState::Attack, 0.5, 10.0);
        ctx.player_alive = false;
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, AiState::Idle);
        assert!(!update.begin_attack);
    }

    // ---- Hit resolution ----

    #[test]
    fn test_hit_lands_within_buffer() {
        let resolution = resolve_hit(AiState::Attack, 2.2, 1.8, 0.5, true);
        assert!(resolution.land_hit);
        assert_eq!(resolution.next_state, Some(AiState::Chase));
    }

    #[test]
    fn test_hit_misses_beyond_buffer() {
        let resolution = resolve_hit(AiState::Attack, 2.4, 1.8, 0.5, true);
        assert!(!resolution.land_hit);
        assert_eq!(resolution.next_state, Some(AiState::Chase));
    }

    #[test]
    fn test_dead_attacker_does_nothing() {
        let resolution = resolve_hit(AiState::Dead, 0.5, 1.8, 0.5, true);
        assert!(!resolution.land_hit);
        assert_eq!(resolution.next_state, None);
    }

    #[test]
    fn test_dead_target_takes_no_hit() {
        let resolution = resolve_hit(AiState::Attack, 0.5, 1.8, 0.5, false);
        assert!(!resolution.land_hit);
    }

    // ---- Steering policy ----

    #[test]
    fn test_desired_behaviors_per_state() {
        assert_eq!(desired_behaviors(AiState::Chase), &[SteeringBehavior::Seek]);
        assert_eq!(desired_behaviors(AiState::Attack), &[SteeringBehavior::Seek]);
        assert_eq!(desired_behaviors(AiState::Idle), &[SteeringBehavior::Wander]);
        assert!(desired_behaviors(AiState::Dead).is_empty());
    }

    #[test]
    fn test_swap_is_idempotent() {
        let current = [SteeringBehavior::Wander];
        assert!(!needs_swap(&current, desired_behaviors(AiState::Idle)));
        assert!(needs_swap(&current, desired_behaviors(AiState::Chase)));
        assert!(needs_swap(&[], desired_behaviors(AiState::Idle)));
        assert!(needs_swap(
            &[SteeringBehavior::Seek, SteeringBehavior::Wander],
            desired_behaviors(AiState::Chase)
        ));
    }

    #[test]
    fn test_spider_profile_is_consistent() {
        let profile = get_profile(EnemyKind::Spider);
        assert!(profile.max_health > 0.0);
        assert!(profile.attack_range < AGGRO_RADIUS);
        assert!(profile.attack_cooldown > profile.attack_duration * ENEMY_HIT_FRACTION);
    }
}
