//! Drawing surface abstraction for the particle effects

use glam::DVec2;

use crate::geometry::Region;

/// Fill color for a particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Hue in degrees, saturation/lightness in percent
    Hsl {
        hue: f64,
        saturation: f64,
        lightness: f64,
    },
    Rgb(u8, u8, u8),
}

impl Color {
    /// CSS color string (e.g. for `fillStyle`)
    pub fn to_css(&self) -> String {
        match self {
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => format!("hsl({:.1}, {}%, {}%)", hue, saturation, lightness),
            Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}

/// A 2D surface in logical (CSS pixel) coordinates.
///
/// Implementations own the device pixel ratio: after [`Surface::fit`] every
/// draw call takes logical coordinates.
pub trait Surface {
    /// Resize the backing store to `logical * pixel_ratio` and install the
    /// matching scale transform
    fn fit(&mut self, logical: Region, pixel_ratio: f64);

    /// Logical size from the last `fit`
    fn logical_size(&self) -> Region;

    /// Clear the whole surface
    fn clear(&mut self);

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color, alpha: f64);

    /// Square of side `size` centered on `center`, rotated by `rotation` radians
    fn fill_rotated_square(&mut self, center: DVec2, size: f64, rotation: f64, color: Color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_colors() {
        let hsl = Color::Hsl {
            hue: 352.0,
            saturation: 65.0,
            lightness: 62.0,
        };
        assert_eq!(hsl.to_css(), "hsl(352.0, 65%, 62%)");
        assert_eq!(Color::Rgb(255, 77, 9).to_css(), "#ff4d09");
    }
}
