//! Animation-state derivation.
//!
//! Picks a clip from gameplay state; playback itself belongs to the host.

use hecs::Entity;

use hollowfang_core::components::*;
use hollowfang_core::constants::MOVE_INPUT_EPSILON;
use hollowfang_core::enums::{AiState, AnimationClip, WeaponState};
use hollowfang_core::events::GameEvent;

use crate::collaborators::PhysicsWorld;
use crate::config::SimConfig;
use crate::store::{entity_id, EntityStore};

pub fn derive_enemy_clip(state: AiState, horizontal_speed: f32, walk_speed: f32) -> AnimationClip {
    match state {
        AiState::Dead => AnimationClip::Death,
        AiState::Attack => AnimationClip::Attack,
        _ if horizontal_speed > walk_speed => AnimationClip::Walk,
        _ => AnimationClip::Idle,
    }
}

pub fn derive_player_clip(alive: bool, swinging: bool, input: &Input) -> AnimationClip {
    let moving = input.move_dir.x.hypot(input.move_dir.z) > MOVE_INPUT_EPSILON;
    if !alive {
        AnimationClip::Death
    } else if swinging {
        AnimationClip::Attack
    } else if input.is_jumping {
        AnimationClip::Jump
    } else if input.is_crouching {
        AnimationClip::Crouch
    } else if moving && input.is_sprinting {
        AnimationClip::Run
    } else if moving {
        AnimationClip::Walk
    } else {
        AnimationClip::Idle
    }
}

pub fn run<P: PhysicsWorld + ?Sized>(
    store: &mut EntityStore,
    physics: &P,
    config: &SimConfig,
    events: &mut Vec<GameEvent>,
) {
    let mut changes: Vec<(Entity, AnimationClip)> = Vec::new();

    {
        let mut query = store.query::<(&Enemy, &AiState, &Physics, &AnimationState)>();
        for (entity, (_enemy, state, body, animation)) in query.iter() {
            let velocity = physics.linear_velocity(body.body);
            let speed = velocity.x.hypot(velocity.z);
            let clip = derive_enemy_clip(*state, speed, config.walk_animation_speed);
            if clip != animation.clip {
                changes.push((entity, clip));
            }
        }
    }

    {
        let mut query = store.query::<(
            &Player,
            &Input,
            &AnimationState,
            Option<&Weapon>,
            Option<&Health>,
        )>();
        for (entity, (_player, input, animation, weapon, health)) in query.iter() {
            let alive = health.map_or(true, |health| !health.is_depleted());
            let swinging = weapon.is_some_and(|weapon| weapon.state == WeaponState::Swinging);
            let clip = derive_player_clip(alive, swinging, input);
            if clip != animation.clip {
                changes.push((entity, clip));
            }
        }
    }

    for (entity, clip) in changes {
        if let Some(mut animation) = store.get_mut::<AnimationState>(entity) {
            animation.clip = clip;
        }
        events.push(GameEvent::AnimationChanged {
            entity: entity_id(entity),
            clip,
        });
    }
}
