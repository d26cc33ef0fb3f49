//! Simulation instances and the per-frame step
//!
//! One instance per triggered effect. The owner calls [`Simulation::frame`]
//! once per display refresh until it returns false; nothing else stops it.

use glam::DVec2;
use rand::Rng;

use super::particle::{Look, Particle};
use crate::consts::*;
use crate::geometry::{Point, Region};
use crate::polar_to_cartesian;
use crate::renderer::{Color, Surface};

/// Which effect an instance runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Spark ring at the decline point, ends when every spark has faded
    Burst,
    /// Celebration confetti, ends when every piece has fallen out of view
    Confetti,
}

/// A request to start an effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Burst { origin: Point },
    Confetti,
}

impl Effect {
    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::Burst { .. } => EffectKind::Burst,
            Effect::Confetti => EffectKind::Confetti,
        }
    }
}

/// One running effect
#[derive(Debug, Clone)]
pub struct Simulation {
    kind: EffectKind,
    particles: Vec<Particle>,
    /// Confetti below this y has left the view
    exit_y: f64,
    frames: u32,
}

impl Simulation {
    /// Start `effect` inside `region`
    pub fn start(effect: Effect, region: Region, rng: &mut impl Rng) -> Self {
        match effect {
            Effect::Burst { origin } => Self::burst(origin, rng),
            Effect::Confetti => Self::confetti(region, rng),
        }
    }

    /// Size `surface` to `region` at `pixel_ratio`, then start `effect` on it.
    /// Every instance refits before its first frame.
    pub fn begin(
        effect: Effect,
        region: Region,
        pixel_ratio: f64,
        surface: &mut dyn Surface,
        rng: &mut impl Rng,
    ) -> Self {
        surface.fit(region, pixel_ratio);
        Self::start(effect, region, rng)
    }

    /// Evenly spaced ring of sparks with jittered angles and speeds
    pub fn burst(origin: Point, rng: &mut impl Rng) -> Self {
        let origin = DVec2::from(origin);
        let particles = (0..BURST_COUNT)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / BURST_COUNT as f64
                    + rng.random::<f64>() * BURST_ANGLE_JITTER;
                let speed = rng.random_range(BURST_SPEED_MIN..BURST_SPEED_MAX);
                Particle {
                    pos: origin,
                    vel: polar_to_cartesian(speed, angle),
                    life: 1.0,
                    look: Look::Spark {
                        hue: rng.random_range(BURST_HUE_MIN..BURST_HUE_MAX),
                        radius: BURST_RADIUS,
                    },
                }
            })
            .collect();

        Self {
            kind: EffectKind::Burst,
            particles,
            exit_y: f64::INFINITY,
            frames: 0,
        }
    }

    /// Confetti thrown upward from the center of `region`
    pub fn confetti(region: Region, rng: &mut impl Rng) -> Self {
        let origin = DVec2::from(region.center());
        let particles = (0..CONFETTI_COUNT)
            .map(|_| {
                let (r, g, b) = CONFETTI_PALETTE[rng.random_range(0..CONFETTI_PALETTE.len())];
                Particle {
                    pos: origin,
                    vel: DVec2::new(
                        rng.random_range(CONFETTI_VX_MIN..CONFETTI_VX_MAX),
                        rng.random_range(CONFETTI_VY_MIN..CONFETTI_VY_MAX),
                    ),
                    life: 1.0,
                    look: Look::Confetti {
                        color: Color::Rgb(r, g, b),
                        size: rng.random_range(CONFETTI_SIZE_MIN..CONFETTI_SIZE_MAX),
                        rotation: rng.random::<f64>() * std::f64::consts::TAU,
                        spin: rng.random_range(-CONFETTI_SPIN_MAX..CONFETTI_SPIN_MAX),
                    },
                }
            })
            .collect();

        Self {
            kind: EffectKind::Confetti,
            particles,
            exit_y: region.height + CONFETTI_EXIT_MARGIN,
            frames: 0,
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    /// Particles still being simulated, in spawn order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Frames stepped so far
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Whether another frame should be scheduled
    pub fn is_running(&self) -> bool {
        !self.particles.is_empty()
    }

    /// Continuation predicate for a single particle
    fn keeps(&self, p: &Particle) -> bool {
        match self.kind {
            EffectKind::Burst => p.life > 0.0,
            EffectKind::Confetti => p.pos.y < self.exit_y,
        }
    }

    /// Advance every particle once and drop the ones that are done.
    /// Dropped particles never come back.
    pub fn advance(&mut self) {
        let (gravity, decay) = match self.kind {
            EffectKind::Burst => (BURST_GRAVITY, BURST_LIFE_DECAY),
            EffectKind::Confetti => (CONFETTI_GRAVITY, 0.0),
        };
        for p in self.particles.iter_mut() {
            p.advance(gravity, decay);
        }

        let mut particles = std::mem::take(&mut self.particles);
        particles.retain(|p| self.keeps(p));
        self.particles = particles;
        self.frames += 1;
    }

    /// Draw the live particles
    pub fn render(&self, surface: &mut dyn Surface) {
        for p in &self.particles {
            match p.look {
                Look::Spark { hue, radius } => {
                    surface.fill_circle(p.pos, radius, Particle::spark_color(hue), p.life)
                }
                Look::Confetti {
                    color,
                    size,
                    rotation,
                    ..
                } => surface.fill_rotated_square(p.pos, size, rotation, color),
            }
        }
    }

    /// One display refresh: clear, advance, draw.
    /// Returns true if the instance wants another frame.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> bool {
        surface.clear();
        self.advance();
        self.render(surface);
        self.is_running()
    }

    /// Drive frames back to back until the instance ends or `max_frames`
    /// is reached. Returns the number of frames run.
    #[cfg(test)]
    pub fn run(&mut self, surface: &mut dyn Surface, max_frames: u32) -> u32 {
        let start = self.frames;
        while self.frames - start < max_frames && self.frame(surface) {}
        self.frames - start
    }
}
