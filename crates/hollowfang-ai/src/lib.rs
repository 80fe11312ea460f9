//! Enemy AI for HOLLOWFANG.
//!
//! Implements the enemy behavior state machine, the steering-behavior
//! policy, and archetype tuning profiles. No ECS dependency.

pub mod fsm;
pub mod profiles;
pub mod steering;

pub use hollowfang_core as core;

#[cfg(test)]
mod tests;
