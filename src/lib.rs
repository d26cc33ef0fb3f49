//! Valentine Prompt - a yes/no prompt whose "No" refuses to be clicked
//!
//! Core modules:
//! - `geometry`: Regions, points and the built-in teleport position
//! - `backend`: Provider chain (accelerated module → alternate module → built-in)
//! - `sim`: Particle simulation (burst and confetti)
//! - `renderer`: Drawing surface abstraction (2D canvas on web)
//! - `interaction`: Prompt state machine and controller
//! - `platform`: Browser wiring and the native terminal prompt

pub mod backend;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use backend::{BackendResolver, Provider, Tier};
pub use error::{BootError, ProviderFault, SettingsError};
pub use geometry::{Point, Region};
pub use interaction::{DeclineInput, InteractionState, Phase, PromptController, PromptView};
pub use settings::Settings;

use glam::DVec2;

/// Effect tuning constants (per-frame units, one frame = one display refresh)
pub mod consts {
    /// Burst particle count
    pub const BURST_COUNT: usize = 14;
    /// Burst speed range (px/frame)
    pub const BURST_SPEED_MIN: f64 = 2.0;
    pub const BURST_SPEED_MAX: f64 = 6.0;
    /// Max random angular offset added to each evenly spaced emission angle (radians)
    pub const BURST_ANGLE_JITTER: f64 = 1.0;
    /// Downward acceleration applied to burst particles
    pub const BURST_GRAVITY: f64 = 0.12;
    /// Life lost per frame (life starts at 1.0)
    pub const BURST_LIFE_DECAY: f64 = 0.025;
    pub const BURST_RADIUS: f64 = 4.0;
    /// Warm pink band for spark hues (degrees)
    pub const BURST_HUE_MIN: f64 = 340.0;
    pub const BURST_HUE_MAX: f64 = 365.0;

    /// Confetti particle count
    pub const CONFETTI_COUNT: usize = 90;
    pub const CONFETTI_VX_MIN: f64 = -7.0;
    pub const CONFETTI_VX_MAX: f64 = 7.0;
    /// Upward launch (negative y is up on screen)
    pub const CONFETTI_VY_MIN: f64 = -15.0;
    pub const CONFETTI_VY_MAX: f64 = -6.0;
    /// Heavier than the burst so pieces fall out quickly
    pub const CONFETTI_GRAVITY: f64 = 0.32;
    pub const CONFETTI_SPIN_MAX: f64 = 0.2;
    pub const CONFETTI_SIZE_MIN: f64 = 6.0;
    pub const CONFETTI_SIZE_MAX: f64 = 12.0;
    /// Pieces are dropped once they fall this far below the region
    pub const CONFETTI_EXIT_MARGIN: f64 = 24.0;
    /// Confetti colors (RGB)
    pub const CONFETTI_PALETTE: [(u8, u8, u8); 5] = [
        (255, 77, 109),  // rose
        (255, 143, 171), // pink
        (255, 209, 102), // gold
        (201, 24, 74),   // crimson
        (255, 240, 245), // blush white
    ];
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Milliseconds since the epoch, used as the request seed for providers
#[cfg(target_arch = "wasm32")]
pub fn now_seed() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the epoch, used as the request seed for providers
#[cfg(not(target_arch = "wasm32"))]
pub fn now_seed() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_polar_to_cartesian_axes() {
        let right = polar_to_cartesian(2.0, 0.0);
        assert!((right.x - 2.0).abs() < 1e-12 && right.y.abs() < 1e-12);

        let down = polar_to_cartesian(3.0, PI / 2.0);
        assert!(down.x.abs() < 1e-12 && (down.y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_confetti_outnumbers_burst() {
        assert!(consts::CONFETTI_COUNT > consts::BURST_COUNT);
        assert!(consts::CONFETTI_GRAVITY > consts::BURST_GRAVITY);
    }
}
