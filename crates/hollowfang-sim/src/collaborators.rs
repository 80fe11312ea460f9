//! Interfaces to the collaborators that surround the simulation core.
//!
//! The host owns the rigid-body solver, the scene graph and the steering
//! planner; the core only talks to them through these traits. Presentation
//! callbacks are not traits: they are `GameEvent`s returned with each frame.

use glam::{Quat, Vec3};

use hollowfang_core::components::InteractionMetadata;
use hollowfang_core::enums::SteeringBehavior;
use hollowfang_core::types::*;

/// A ray cast result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub mesh: MeshId,
    pub distance: f32,
    pub point: Vec3,
}

/// Rigid bodies and scene colliders.
pub trait PhysicsWorld {
    fn linear_velocity(&self, body: BodyHandle) -> Vec3;
    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec3);
    fn set_angular_velocity(&mut self, body: BodyHandle, velocity: Vec3);
    fn set_rotation(&mut self, body: BodyHandle, rotation: Quat);

    /// Nearest hit within `max_distance` among meshes accepted by `filter`.
    fn cast_ray(
        &self,
        ray: &Ray,
        max_distance: f32,
        filter: &mut dyn FnMut(MeshId) -> bool,
    ) -> Option<RayHit>;
}

/// Scene nodes, cameras and the mesh hierarchy.
pub trait SceneGraph {
    fn world_position(&self, node: NodeHandle) -> Vec3;
    fn set_node_rotation(&mut self, node: NodeHandle, rotation: Quat);
    /// Eye position and forward direction of a camera.
    fn camera_ray(&self, camera: CameraHandle) -> Ray;
    fn parent_mesh(&self, mesh: MeshId) -> Option<MeshId>;
    fn interaction_metadata(&self, mesh: MeshId) -> Option<InteractionMetadata>;
}

/// Steering planner owning every vehicle's behaviors, position and velocity.
///
/// Behavior instances (and any internal state such as a wander target)
/// belong to the planner.
pub trait SteeringPlanner {
    fn behaviors(&self, vehicle: VehicleHandle) -> &[SteeringBehavior];
    fn add_behavior(&mut self, vehicle: VehicleHandle, behavior: SteeringBehavior);
    fn remove_behavior(&mut self, vehicle: VehicleHandle, behavior: SteeringBehavior);
    fn clear_behaviors(&mut self, vehicle: VehicleHandle);
    /// Target shared by every `Seek` behavior.
    fn set_seek_target(&mut self, target: Vec3);
    /// Advance every vehicle once.
    fn tick(&mut self, dt: f64);
    fn position(&self, vehicle: VehicleHandle) -> Vec3;
    fn set_position(&mut self, vehicle: VehicleHandle, position: Vec3);
    fn velocity(&self, vehicle: VehicleHandle) -> Vec3;
}

/// Everything the engine needs from the host in one bound.
pub trait Host: PhysicsWorld + SceneGraph + SteeringPlanner {}

impl<T: PhysicsWorld + SceneGraph + SteeringPlanner + ?Sized> Host for T {}
