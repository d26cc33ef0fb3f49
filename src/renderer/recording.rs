//! In-memory surface for tests

use glam::DVec2;

use super::surface::{Color, Surface};
use crate::geometry::Region;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Circle { center: DVec2, alpha: f64 },
    Square { center: DVec2, rotation: f64 },
}

/// Records every call; `frames` holds the ops drawn since each clear
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: Region,
    pub pixel_ratio: f64,
    pub fits: u32,
    pub clears: u32,
    pub frames: Vec<Vec<DrawOp>>,
}

impl RecordingSurface {
    pub fn new(size: Region) -> Self {
        Self {
            size,
            pixel_ratio: 1.0,
            ..Default::default()
        }
    }

    pub fn last_frame(&self) -> &[DrawOp] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Surface for RecordingSurface {
    fn fit(&mut self, logical: Region, pixel_ratio: f64) {
        self.size = logical;
        self.pixel_ratio = pixel_ratio;
        self.fits += 1;
    }

    fn logical_size(&self) -> Region {
        self.size
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.frames.push(Vec::new());
    }

    fn fill_circle(&mut self, center: DVec2, _radius: f64, _color: Color, alpha: f64) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push(DrawOp::Circle { center, alpha });
        }
    }

    fn fill_rotated_square(
        &mut self,
        center: DVec2,
        _size: f64,
        rotation: f64,
        _color: Color,
    ) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push(DrawOp::Square { center, rotation });
        }
    }
}
