//! Simulation engine for HOLLOWFANG.
//!
//! Owns the entity store, runs systems once per frame in a fixed order,
//! reconciles steering, physics and gameplay state, and produces
//! `FrameSnapshot`s for the HUD.

pub mod collaborators;
pub mod config;
pub mod context;
pub mod engine;
pub mod headless;
pub mod registry;
pub mod store;
pub mod systems;
pub mod world_setup;

pub use collaborators::{Host, PhysicsWorld, SceneGraph, SteeringPlanner};
pub use config::SimConfig;
pub use engine::SimulationEngine;
pub use hollowfang_core as core;
pub use store::EntityStore;
