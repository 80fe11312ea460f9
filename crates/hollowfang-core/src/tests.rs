#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::components::*;
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::types::*;

    #[test]
    fn test_health_damage_clamps_at_zero() {
        let mut health = Health::full(100.0);
        let taken = health.apply_damage(30.0);
        assert_eq!(taken, 30.0);
        assert_eq!(health.current, 70.0);

        let taken = health.apply_damage(500.0);
        assert_eq!(taken, 70.0, "Only the remaining health can be taken");
        assert_eq!(health.current, 0.0);
        assert!(health.is_depleted());
    }

    #[test]
    fn test_health_negative_damage_never_exceeds_max() {
        let mut health = Health {
            current: 95.0,
            max: 100.0,
        };
        health.apply_damage(-20.0);
        assert_eq!(health.current, 100.0);
    }

    #[test]
    fn test_stamina_adjust_clamps_both_ends() {
        let mut stamina = Stamina::full(50.0);
        stamina.adjust(-80.0);
        assert_eq!(stamina.current, 0.0);
        stamina.adjust(200.0);
        assert_eq!(stamina.current, 50.0);
    }

    #[test]
    fn test_sensor_reset_keeps_range_only() {
        let mut sensor = Sensor::new(4.0);
        sensor.hit_entity = Some(EntityId(7));
        sensor.hit_distance = Some(2.5);
        sensor.hit_point = Some(Vec3::ONE);
        sensor.reset();
        assert_eq!(sensor.check_range, 4.0);
        assert!(sensor.hit_entity.is_none());
        assert!(sensor.hit_distance.is_none());
        assert!(sensor.hit_point.is_none());
        assert!(sensor.target().is_none());
    }

    #[test]
    fn test_sensor_target_prefers_entity() {
        let mut sensor = Sensor::new(4.0);
        sensor.hit_metadata = Some(InteractionMetadata {
            id: 1,
            prompt: "Open".into(),
        });
        assert!(matches!(
            sensor.target(),
            Some(SensorTarget::Interactable { .. })
        ));

        sensor.hit_entity = Some(EntityId(3));
        assert_eq!(
            sensor.target(),
            Some(SensorTarget::Entity {
                entity: EntityId(3)
            })
        );
    }

    #[test]
    fn test_ai_state_engagement() {
        assert!(!AiState::Idle.is_engaged());
        assert!(AiState::Chase.is_engaged());
        assert!(AiState::Attack.is_engaged());
        assert!(!AiState::Dead.is_engaged());
        assert!(AiState::Dead.is_dead());
    }

    #[test]
    fn test_sim_time_advance_accumulates() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance(1.0 / 60.0);
        }
        assert_eq!(time.tick, 60);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert_eq!(ray.at(2.0), Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_game_event_is_tagged() {
        let event = GameEvent::FightModeChanged { in_fight: true };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"FightModeChanged\""), "{json}");
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_pending_action_json_shape() {
        let action = PendingAction::EnemyAttackHit {
            attacker: EntityId(1),
            target: EntityId(2),
        };
        let json = serde_json::to_string(&action).unwrap();
        let back: PendingAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }
}
