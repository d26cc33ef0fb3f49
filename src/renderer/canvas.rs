//! 2D canvas implementation of [`Surface`]

use std::f64::consts::TAU;

use glam::DVec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::{Color, Surface};
use crate::geometry::Region;

/// The effects canvas and its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: Region,
}

impl CanvasSurface {
    /// None when the canvas cannot produce a 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            size: Region::default(),
        })
    }
}

impl Surface for CanvasSurface {
    fn fit(&mut self, logical: Region, pixel_ratio: f64) {
        let pixel_ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        self.canvas
            .set_width((logical.width * pixel_ratio).round() as u32);
        self.canvas
            .set_height((logical.height * pixel_ratio).round() as u32);
        // Resizing resets the transform, so set it absolutely
        let _ = self
            .ctx
            .set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0);
        self.size = logical;
    }

    fn logical_size(&self) -> Region {
        self.size
    }

    fn clear(&mut self) {
        let size = self.logical_size();
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color, alpha: f64) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(alpha.clamp(0.0, 1.0));
        ctx.set_fill_style_str(&color.to_css());
        ctx.begin_path();
        let _ = ctx.arc(center.x, center.y, radius, 0.0, TAU);
        ctx.fill();
        ctx.restore();
    }

    fn fill_rotated_square(&mut self, center: DVec2, size: f64, rotation: f64, color: Color) {
        let ctx = &self.ctx;
        ctx.save();
        let _ = ctx.translate(center.x, center.y);
        let _ = ctx.rotate(rotation);
        ctx.set_fill_style_str(&color.to_css());
        ctx.fill_rect(-size / 2.0, -size / 2.0, size, size);
        ctx.restore();
    }
}
