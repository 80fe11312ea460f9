//! Kinematic reconciliation: pull -> plan -> apply & push-back.
//!
//! Physics owns position; the velocity source owns horizontal intent.
//! Every frame the planner is seeded with post-physics positions, ticked once,
//! and its horizontal velocity is written into the bodies while gravity's Y
//! component is kept. Bodies are rotation-locked; only the visual node turns
//! to face the direction of travel. Input-driven bodies (the player) go
//! through the same apply step with a different velocity source.

use glam::{Quat, Vec3};

use hollowfang_core::components::*;
use hollowfang_core::constants::{FACING_SPEED_EPSILON, GROUNDED_VELOCITY_EPSILON};
use hollowfang_core::enums::AiState;
use hollowfang_core::types::{BodyHandle, NodeHandle, VehicleHandle};

use crate::collaborators::Host;
use crate::context::FrameContext;
use crate::store::EntityStore;

/// Where an entity's desired horizontal velocity comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelocitySource {
    /// Steering planner output for the entity's vehicle.
    Planned,
    /// The entity's own `Input` scaled by its `Locomotion`.
    PlayerInput,
}

impl VelocitySource {
    /// Pick the single source for an entity. Planned wins when both apply.
    pub fn select(has_agent: bool, has_input: bool) -> Option<Self> {
        match (has_agent, has_input) {
            (true, _) => Some(VelocitySource::Planned),
            (false, true) => Some(VelocitySource::PlayerInput),
            (false, false) => None,
        }
    }
}

/// One body's apply step, resolved from the store before touching the host.
struct BodyPlan {
    body: BodyHandle,
    node: NodeHandle,
    visual: Visual,
    motion: Motion,
}

#[derive(Clone, Copy)]
enum Motion {
    Planned {
        vehicle: VehicleHandle,
        halted: bool,
    },
    Input {
        horizontal: Vec3,
        jump: Option<f32>,
    },
}

/// Run the reconciliation loop for one frame.
pub fn run<H: Host + ?Sized>(store: &EntityStore, host: &mut H, ctx: &FrameContext) {
    pull(store, host);
    host.tick(ctx.dt);
    apply(store, host);
}

/// Seed every vehicle with its body's authoritative position.
pub fn pull<H: Host + ?Sized>(store: &EntityStore, host: &mut H) {
    let mut query = store.query::<(&AiAgent, &Transform)>();
    for (_entity, (agent, transform)) in query.iter() {
        let position = host.world_position(transform.node);
        host.set_position(agent.vehicle, position);
    }
}

fn apply<H: Host + ?Sized>(store: &EntityStore, host: &mut H) {
    let plans = collect_plans(store);

    for plan in plans {
        let current = host.linear_velocity(plan.body);
        let (horizontal, vertical) = match plan.motion {
            Motion::Planned { halted: true, .. } => (Vec3::ZERO, current.y),
            Motion::Planned { vehicle, .. } => (host.velocity(vehicle), current.y),
            Motion::Input { horizontal, jump } => {
                let grounded = current.y.abs() < GROUNDED_VELOCITY_EPSILON;
                let vertical = match jump {
                    Some(jump_velocity) if grounded => jump_velocity,
                    _ => current.y,
                };
                (horizontal, vertical)
            }
        };

        host.set_linear_velocity(plan.body, Vec3::new(horizontal.x, vertical, horizontal.z));
        host.set_angular_velocity(plan.body, Vec3::ZERO);
        host.set_rotation(plan.body, Quat::IDENTITY);

        if let Some(facing) = facing_rotation(horizontal) {
            host.set_node_rotation(plan.visual.node, facing * plan.visual.rotation_offset);
        }

        // Push-back: the planner never keeps its own integrated position.
        if let Motion::Planned { vehicle, .. } = plan.motion {
            let position = host.world_position(plan.node);
            host.set_position(vehicle, position);
        }
    }
}

fn collect_plans(store: &EntityStore) -> Vec<BodyPlan> {
    let mut query = store.query::<(
        &Physics,
        &Transform,
        &Visual,
        Option<&AiAgent>,
        Option<&AiState>,
        Option<&Input>,
        Option<&Locomotion>,
        Option<&Health>,
        Option<&Stamina>,
    )>();

    let mut plans = Vec::new();
    for (_entity, (physics, transform, visual, agent, state, input, locomotion, health, stamina)) in
        query.iter()
    {
        let driven = input.zip(locomotion);
        let motion = match VelocitySource::select(agent.is_some(), driven.is_some()) {
            Some(VelocitySource::Planned) => {
                let Some(agent) = agent else { continue };
                Motion::Planned {
                    vehicle: agent.vehicle,
                    halted: state.is_some_and(|state| state.is_dead()),
                }
            }
            Some(VelocitySource::PlayerInput) => {
                let Some((input, locomotion)) = driven else { continue };
                let alive = health.map_or(true, |health| !health.is_depleted());
                let can_sprint = stamina.map_or(true, |stamina| stamina.current > 0.0);
                if alive {
                    Motion::Input {
                        horizontal: input_velocity(input, locomotion, can_sprint),
                        jump: input.is_jumping.then_some(locomotion.jump_velocity),
                    }
                } else {
                    Motion::Input {
                        horizontal: Vec3::ZERO,
                        jump: None,
                    }
                }
            }
            None => continue,
        };

        plans.push(BodyPlan {
            body: physics.body,
            node: transform.node,
            visual: *visual,
            motion,
        });
    }
    plans
}

/// Horizontal velocity requested by input.
pub fn input_velocity(input: &Input, locomotion: &Locomotion, can_sprint: bool) -> Vec3 {
    let mut direction = Vec3::new(input.move_dir.x, 0.0, input.move_dir.z);
    if direction.length_squared() > 1.0 {
        direction = direction.normalize();
    }
    let mut speed = locomotion.walk_speed;
    if input.is_sprinting && can_sprint {
        speed *= locomotion.sprint_multiplier;
    }
    direction * speed
}

/// Yaw that faces `velocity` in the XZ plane, with +Z as forward.
pub fn facing_rotation(velocity: Vec3) -> Option<Quat> {
    let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
    if horizontal.length() <= FACING_SPEED_EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(horizontal.x.atan2(horizontal.z)))
}
