//! Headless reference collaborators.
//!
//! `HeadlessHost` stands in for the renderer, the rigid-body solver and the
//! steering planner when the engine runs without a game client: in tests and
//! in the headless runner. Bodies are spheres falling onto a flat ground plane
//! at `y = 0`; rays hit sphere meshes; seek and wander produce plain capped
//! velocities. It is a harness, not a physics engine.

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hollowfang_ai::profiles::get_profile;
use hollowfang_core::components::InteractionMetadata;
use hollowfang_core::enums::{EnemyKind, SteeringBehavior};
use hollowfang_core::types::*;

use crate::collaborators::{PhysicsWorld, RayHit, SceneGraph, SteeringPlanner};
use crate::world_setup::ActorHandles;

const GRAVITY: f32 = 9.81;

/// Eye height above the player's body center.
const PLAYER_EYE_OFFSET: Vec3 = Vec3::new(0.0, 0.6, 0.0);
const PLAYER_BODY_RADIUS: f32 = 0.5;

/// Fraction of max speed used while wandering.
const WANDER_SPEED_FACTOR: f32 = 0.4;
/// Largest heading change per second while wandering (radians).
const WANDER_JITTER: f32 = 1.5;
/// Seek stops this close to the target.
const SEEK_ARRIVE_DISTANCE: f32 = 0.1;

#[derive(Debug, Clone)]
struct Body {
    position: Vec3,
    linear_velocity: Vec3,
    angular_velocity: Vec3,
    rotation: Quat,
    radius: f32,
    fixed: bool,
}

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    Body(BodyHandle),
    Child { parent: NodeHandle },
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    rotation: Quat,
}

#[derive(Debug, Clone)]
struct Mesh {
    parent: Option<MeshId>,
    /// Sphere used for ray hits; `None` for meshes that are never hit directly.
    shape: Option<BodyHandle>,
    metadata: Option<InteractionMetadata>,
}

#[derive(Debug, Clone)]
struct Camera {
    node: NodeHandle,
    eye_offset: Vec3,
    forward: Vec3,
}

#[derive(Debug, Clone)]
struct Vehicle {
    position: Vec3,
    velocity: Vec3,
    max_speed: f32,
    behaviors: Vec<SteeringBehavior>,
    wander_heading: f32,
}

pub struct HeadlessHost {
    bodies: Vec<Body>,
    nodes: Vec<Node>,
    meshes: Vec<Mesh>,
    cameras: Vec<Camera>,
    vehicles: Vec<Vehicle>,
    seek_target: Vec3,
    rng: ChaCha8Rng,
}

impl HeadlessHost {
    pub fn new(seed: u64) -> Self {
        Self {
            bodies: Vec::new(),
            nodes: Vec::new(),
            meshes: Vec::new(),
            cameras: Vec::new(),
            vehicles: Vec::new(),
            seek_target: Vec3::ZERO,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Spawn a dynamic sphere with a collider node, a visual child node, a
    /// collider mesh (returned in `meshes`) and a pickable visual mesh parented to it.
    pub fn spawn_actor(&mut self, position: Vec3, radius: f32) -> ActorHandles {
        let body = self.add_body(position, radius, false);
        let node = self.add_node(NodeKind::Body(body));
        let visual = self.add_node(NodeKind::Child { parent: node });

        let collider_mesh = self.add_mesh(Mesh {
            parent: None,
            shape: None,
            metadata: None,
        });
        self.add_mesh(Mesh {
            parent: Some(collider_mesh),
            shape: Some(body),
            metadata: None,
        });

        ActorHandles {
            node,
            body,
            visual,
            rotation_offset: Quat::IDENTITY,
            meshes: vec![collider_mesh],
            vehicle: None,
            camera: None,
            has_swing_animation: false,
        }
    }

    /// Actor rig for the player: body plus a first-person camera looking down +Z.
    pub fn spawn_player_rig(&mut self, position: Vec3) -> ActorHandles {
        let mut handles = self.spawn_actor(position, PLAYER_BODY_RADIUS);
        handles.camera = Some(self.attach_camera(handles.node, PLAYER_EYE_OFFSET));
        handles
    }

    /// Actor rig for an enemy: body sized by the archetype plus a steering vehicle.
    pub fn spawn_enemy_rig(&mut self, kind: EnemyKind, position: Vec3) -> ActorHandles {
        let profile = get_profile(kind);
        let mut handles = self.spawn_actor(position, profile.body_radius);
        // Imported spider meshes face -Z.
        handles.rotation_offset = Quat::from_rotation_y(std::f32::consts::PI);
        handles.vehicle = Some(self.add_vehicle(position, profile.max_speed));
        handles
    }

    /// A fixed interactable prop carrying metadata.
    pub fn spawn_prop(
        &mut self,
        position: Vec3,
        radius: f32,
        metadata: InteractionMetadata,
    ) -> MeshId {
        let body = self.add_body(position, radius, true);
        self.add_node(NodeKind::Body(body));
        self.add_mesh(Mesh {
            parent: None,
            shape: Some(body),
            metadata: Some(metadata),
        })
    }

    pub fn attach_camera(&mut self, node: NodeHandle, eye_offset: Vec3) -> CameraHandle {
        self.cameras.push(Camera {
            node,
            eye_offset,
            forward: Vec3::Z,
        });
        CameraHandle(self.cameras.len() as u32 - 1)
    }

    pub fn add_vehicle(&mut self, position: Vec3, max_speed: f32) -> VehicleHandle {
        let wander_heading = self.rng.gen_range(0.0..std::f32::consts::TAU);
        self.vehicles.push(Vehicle {
            position,
            velocity: Vec3::ZERO,
            max_speed,
            behaviors: Vec::new(),
            wander_heading,
        });
        VehicleHandle(self.vehicles.len() as u32 - 1)
    }

    /// Point a camera at a world position.
    pub fn look_at(&mut self, camera: CameraHandle, target: Vec3) {
        let eye = self.camera_ray(camera).origin;
        if let Some(cam) = self.cameras.get_mut(camera.0 as usize) {
            let forward = (target - eye).normalize_or_zero();
            if forward != Vec3::ZERO {
                cam.forward = forward;
            }
        }
    }

    pub fn set_camera_forward(&mut self, camera: CameraHandle, forward: Vec3) {
        if let Some(cam) = self.cameras.get_mut(camera.0 as usize) {
            cam.forward = forward.normalize_or_zero();
        }
    }

    /// Integrate gravity and velocity for every dynamic body, resting on the ground plane.
    pub fn step_physics(&mut self, dt: f64) {
        let dt = dt as f32;
        for body in self.bodies.iter_mut().filter(|body| !body.fixed) {
            body.linear_velocity.y -= GRAVITY * dt;
            body.position += body.linear_velocity * dt;
            if body.position.y < body.radius {
                body.position.y = body.radius;
                body.linear_velocity.y = body.linear_velocity.y.max(0.0);
            }
        }
    }

    pub fn body_position(&self, body: BodyHandle) -> Vec3 {
        self.bodies
            .get(body.0 as usize)
            .map_or(Vec3::ZERO, |body| body.position)
    }

    pub fn set_body_position(&mut self, body: BodyHandle, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(body.0 as usize) {
            body.position = position;
        }
    }

    pub fn body_rotation(&self, body: BodyHandle) -> Quat {
        self.bodies
            .get(body.0 as usize)
            .map_or(Quat::IDENTITY, |body| body.rotation)
    }

    pub fn angular_velocity(&self, body: BodyHandle) -> Vec3 {
        self.bodies
            .get(body.0 as usize)
            .map_or(Vec3::ZERO, |body| body.angular_velocity)
    }

    pub fn node_rotation(&self, node: NodeHandle) -> Quat {
        self.nodes
            .get(node.0 as usize)
            .map_or(Quat::IDENTITY, |node| node.rotation)
    }

    pub fn set_vehicle_velocity(&mut self, vehicle: VehicleHandle, velocity: Vec3) {
        if let Some(vehicle) = self.vehicles.get_mut(vehicle.0 as usize) {
            vehicle.velocity = velocity;
        }
    }

    pub fn seek_target(&self) -> Vec3 {
        self.seek_target
    }

    /// The pickable mesh whose sphere is `body`.
    pub fn visual_mesh(&self, body: BodyHandle) -> Option<MeshId> {
        self.meshes
            .iter()
            .position(|mesh| mesh.shape == Some(body))
            .map(|index| MeshId(index as u32))
    }

    fn add_body(&mut self, position: Vec3, radius: f32, fixed: bool) -> BodyHandle {
        self.bodies.push(Body {
            position,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            radius,
            fixed,
        });
        BodyHandle(self.bodies.len() as u32 - 1)
    }

    fn add_node(&mut self, kind: NodeKind) -> NodeHandle {
        self.nodes.push(Node {
            kind,
            rotation: Quat::IDENTITY,
        });
        NodeHandle(self.nodes.len() as u32 - 1)
    }

    fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() as u32 - 1)
    }

    fn vehicle(&self, vehicle: VehicleHandle) -> Option<&Vehicle> {
        self.vehicles.get(vehicle.0 as usize)
    }

    fn vehicle_mut(&mut self, vehicle: VehicleHandle) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(vehicle.0 as usize)
    }
}

/// Distance along `ray` to the sphere, if hit in front of the origin.
fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    let far = -b + root;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        // Origin inside the sphere.
        Some(far)
    } else {
        None
    }
}

impl PhysicsWorld for HeadlessHost {
    fn linear_velocity(&self, body: BodyHandle) -> Vec3 {
        self.bodies
            .get(body.0 as usize)
            .map_or(Vec3::ZERO, |body| body.linear_velocity)
    }

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec3) {
        if let Some(body) = self.bodies.get_mut(body.0 as usize) {
            body.linear_velocity = velocity;
        }
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, velocity: Vec3) {
        if let Some(body) = self.bodies.get_mut(body.0 as usize) {
            body.angular_velocity = velocity;
        }
    }

    fn set_rotation(&mut self, body: BodyHandle, rotation: Quat) {
        if let Some(body) = self.bodies.get_mut(body.0 as usize) {
            body.rotation = rotation;
        }
    }

    fn cast_ray(
        &self,
        ray: &Ray,
        max_distance: f32,
        filter: &mut dyn FnMut(MeshId) -> bool,
    ) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        for (index, mesh) in self.meshes.iter().enumerate() {
            let Some(shape) = mesh.shape else { continue };
            let Some(body) = self.bodies.get(shape.0 as usize) else {
                continue;
            };
            let Some(distance) = ray_sphere(ray, body.position, body.radius) else {
                continue;
            };
            if distance > max_distance || best.is_some_and(|hit| hit.distance <= distance) {
                continue;
            }
            let id = MeshId(index as u32);
            if !filter(id) {
                continue;
            }
            best = Some(RayHit {
                mesh: id,
                distance,
                point: ray.at(distance),
            });
        }
        best
    }
}

impl SceneGraph for HeadlessHost {
    fn world_position(&self, node: NodeHandle) -> Vec3 {
        let mut current = node;
        // Child nodes sit at their parent's origin.
        for _ in 0..self.nodes.len().max(1) {
            match self.nodes.get(current.0 as usize).map(|node| node.kind) {
                Some(NodeKind::Body(body)) => return self.body_position(body),
                Some(NodeKind::Child { parent }) => current = parent,
                None => break,
            }
        }
        Vec3::ZERO
    }

    fn set_node_rotation(&mut self, node: NodeHandle, rotation: Quat) {
        if let Some(node) = self.nodes.get_mut(node.0 as usize) {
            node.rotation = rotation;
        }
    }

    fn camera_ray(&self, camera: CameraHandle) -> Ray {
        match self.cameras.get(camera.0 as usize) {
            Some(cam) => Ray::new(self.world_position(cam.node) + cam.eye_offset, cam.forward),
            None => Ray::new(Vec3::ZERO, Vec3::Z),
        }
    }

    fn parent_mesh(&self, mesh: MeshId) -> Option<MeshId> {
        self.meshes.get(mesh.0 as usize)?.parent
    }

    fn interaction_metadata(&self, mesh: MeshId) -> Option<InteractionMetadata> {
        self.meshes.get(mesh.0 as usize)?.metadata.clone()
    }
}

impl SteeringPlanner for HeadlessHost {
    fn behaviors(&self, vehicle: VehicleHandle) -> &[SteeringBehavior] {
        match self.vehicle(vehicle) {
            Some(vehicle) => &vehicle.behaviors,
            None => &[],
        }
    }

    fn add_behavior(&mut self, vehicle: VehicleHandle, behavior: SteeringBehavior) {
        if let Some(vehicle) = self.vehicle_mut(vehicle) {
            vehicle.behaviors.push(behavior);
        }
    }

    fn remove_behavior(&mut self, vehicle: VehicleHandle, behavior: SteeringBehavior) {
        if let Some(vehicle) = self.vehicle_mut(vehicle) {
            vehicle.behaviors.retain(|active| *active != behavior);
        }
    }

    fn clear_behaviors(&mut self, vehicle: VehicleHandle) {
        if let Some(vehicle) = self.vehicle_mut(vehicle) {
            vehicle.behaviors.clear();
        }
    }

    fn set_seek_target(&mut self, target: Vec3) {
        self.seek_target = target;
    }

    fn tick(&mut self, dt: f64) {
        let dt = dt as f32;
        let target = self.seek_target;
        for vehicle in &mut self.vehicles {
            let mut desired = Vec3::ZERO;
            for behavior in &vehicle.behaviors {
                desired += match behavior {
                    SteeringBehavior::Seek => {
                        let mut to_target = target - vehicle.position;
                        to_target.y = 0.0;
                        if to_target.length() > SEEK_ARRIVE_DISTANCE {
                            to_target.normalize() * vehicle.max_speed
                        } else {
                            Vec3::ZERO
                        }
                    }
                    SteeringBehavior::Wander => {
                        vehicle.wander_heading +=
                            self.rng.gen_range(-WANDER_JITTER..=WANDER_JITTER) * dt;
                        Vec3::new(vehicle.wander_heading.sin(), 0.0, vehicle.wander_heading.cos())
                            * vehicle.max_speed
                            * WANDER_SPEED_FACTOR
                    }
                };
            }
            vehicle.velocity = desired.clamp_length_max(vehicle.max_speed);
            vehicle.position += vehicle.velocity * dt;
        }
    }

    fn position(&self, vehicle: VehicleHandle) -> Vec3 {
        self.vehicle(vehicle)
            .map_or(Vec3::ZERO, |vehicle| vehicle.position)
    }

    fn set_position(&mut self, vehicle: VehicleHandle, position: Vec3) {
        if let Some(vehicle) = self.vehicle_mut(vehicle) {
            vehicle.position = position;
        }
    }

    fn velocity(&self, vehicle: VehicleHandle) -> Vec3 {
        self.vehicle(vehicle)
            .map_or(Vec3::ZERO, |vehicle| vehicle.velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_settles_on_ground() {
        let mut host = HeadlessHost::new(1);
        let handles = host.spawn_actor(Vec3::new(0.0, 3.0, 0.0), 0.5);
        for _ in 0..240 {
            host.step_physics(1.0 / 60.0);
        }
        let position = host.body_position(handles.body);
        assert!((position.y - 0.5).abs() < 1e-4, "resting height {position}");
        assert!(host.linear_velocity(handles.body).y.abs() < 1e-4);
    }

    #[test]
    fn test_ray_hits_nearest_sphere() {
        let mut host = HeadlessHost::new(1);
        let near = host.spawn_actor(Vec3::new(0.0, 0.0, 3.0), 0.5);
        host.spawn_actor(Vec3::new(0.0, 0.0, 6.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = host.cast_ray(&ray, 10.0, &mut |_| true).unwrap();
        assert_eq!(Some(hit.mesh), host.visual_mesh(near.body));
        assert!((hit.distance - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_ray_filter_skips_meshes() {
        let mut host = HeadlessHost::new(1);
        let near = host.spawn_actor(Vec3::new(0.0, 0.0, 3.0), 0.5);
        let far = host.spawn_actor(Vec3::new(0.0, 0.0, 6.0), 0.5);
        let skip = host.visual_mesh(near.body).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = host.cast_ray(&ray, 10.0, &mut |mesh| mesh != skip).unwrap();
        assert_eq!(Some(hit.mesh), host.visual_mesh(far.body));
    }

    #[test]
    fn test_ray_respects_max_distance() {
        let mut host = HeadlessHost::new(1);
        host.spawn_actor(Vec3::new(0.0, 0.0, 6.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(host.cast_ray(&ray, 3.0, &mut |_| true).is_none());
    }

    #[test]
    fn test_seek_heads_for_target_horizontally() {
        let mut host = HeadlessHost::new(1);
        let vehicle = host.add_vehicle(Vec3::ZERO, 2.0);
        host.add_behavior(vehicle, SteeringBehavior::Seek);
        host.set_seek_target(Vec3::new(10.0, 5.0, 0.0));
        host.tick(0.1);
        let velocity = host.velocity(vehicle);
        assert!((velocity.x - 2.0).abs() < 1e-5);
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_no_behaviors_means_no_velocity() {
        let mut host = HeadlessHost::new(1);
        let vehicle = host.add_vehicle(Vec3::ONE, 2.0);
        host.tick(0.1);
        assert_eq!(host.velocity(vehicle), Vec3::ZERO);
        assert_eq!(host.position(vehicle), Vec3::ONE);
    }
}
