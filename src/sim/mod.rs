//! Particle simulation module
//!
//! Pure effect physics, no platform dependencies:
//! - Fixed per-frame integration (one step per display refresh)
//! - Randomness only through the caller's RNG
//! - Each instance ends on its own once no particle is left

pub mod particle;
pub mod simulation;

pub use particle::{Look, Particle};
pub use simulation::{Effect, EffectKind, Simulation};
