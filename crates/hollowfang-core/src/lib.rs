//! Core types and definitions for the HOLLOWFANG simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! handles, components, events, HUD snapshots, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
