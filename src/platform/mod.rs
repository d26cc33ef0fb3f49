//! Platform layer
//!
//! - `web`: DOM binding, canvas frame loop and external module probing (wasm)
//! - `terminal`: interactive stdin/stdout prompt (native)

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;
