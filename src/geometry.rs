//! Regions, points and the built-in teleport position

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Bounds within which a point must be produced
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Region {
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Visual center of the region
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A 2D coordinate (CSS pixels, origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point::new(v.x, v.y)
    }
}

/// Uniform random point inside `region` inset by `padding` on every side.
///
/// When the region is too small for the inset, the axis collapses onto
/// `padding`.
pub fn teleport_position(region: Region, padding: f64, rng: &mut impl Rng) -> Point {
    let span_x = (region.width - padding * 2.0).max(0.0);
    let span_y = (region.height - padding * 2.0).max(0.0);
    Point::new(
        padding + rng.random::<f64>() * span_x,
        padding + rng.random::<f64>() * span_y,
    )
}
