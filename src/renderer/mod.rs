//! Effect rendering
//!
//! Particles draw through the [`Surface`] trait; on the web that is the 2D
//! canvas layered over the prompt card.

pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(test)]
pub mod recording;

pub use surface::{Color, Surface};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
