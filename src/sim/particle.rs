//! Particle records

use glam::DVec2;

use crate::renderer::Color;

/// How a particle looks; fixed at spawn except for confetti rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Look {
    /// Round spark, faded by life
    Spark { hue: f64, radius: f64 },
    /// Spinning square
    Confetti {
        color: Color,
        size: f64,
        rotation: f64,
        spin: f64,
    },
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    /// 1.0 at spawn, only ever decreases
    pub life: f64,
    pub look: Look,
}

impl Particle {
    /// Move one frame: position by velocity, then gravity and decay
    pub fn advance(&mut self, gravity: f64, life_decay: f64) {
        self.pos += self.vel;
        self.vel.y += gravity;
        self.life -= life_decay;
        if let Look::Confetti { rotation, spin, .. } = &mut self.look {
            *rotation += *spin;
        }
    }

    /// Spark fill color
    pub fn spark_color(hue: f64) -> Color {
        Color::Hsl {
            hue,
            saturation: 65.0,
            lightness: 62.0,
        }
    }
}
