//! Software rasterizer over an RGBA image.

use glam::Vec2;
use image::{Rgba, RgbaImage};
use reconview_core::Color;

use crate::surface::DrawSurface;
use crate::transform::Viewport;

/// A drawing surface backed by an in-memory RGBA image.
///
/// Discs cover every pixel whose center lies within the radius.
#[derive(Debug, Clone)]
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    /// Creates a surface of `width` x `height` pixels.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Returns the rendered image.
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consumes the surface and returns the rendered image.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Returns the color of the pixel at `(x, y)`, if it is inside the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.image.width() || y >= self.image.height() {
            return None;
        }
        let Rgba([r, g, b, _]) = *self.image.get_pixel(x, y);
        Some(Color::new(r, g, b))
    }
}

impl DrawSurface for ImageSurface {
    #[allow(clippy::cast_precision_loss)]
    fn viewport(&self) -> Viewport {
        Viewport::new(self.image.width() as f32, self.image.height() as f32)
    }

    fn clear(&mut self, color: Color) {
        let fill = Rgba(color.to_rgba());
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color) {
        if !center.is_finite() || !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return;
        }

        let min_x = (center.x - radius).floor().max(0.0);
        let max_x = (center.x + radius).ceil().min(width as f32 - 1.0);
        let min_y = (center.y - radius).floor().max(0.0);
        let max_y = (center.y + radius).ceil().min(height as f32 - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        let fill = Rgba(color.to_rgba());
        let radius_sq = radius * radius;
        for y in min_y as u32..=max_y as u32 {
            for x in min_x as u32..=max_x as u32 {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= radius_sq {
                    self.image.put_pixel(x, y, fill);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut surface = ImageSurface::new(4, 3);
        surface.clear(Color::new(10, 20, 30));
        assert!(surface.image().pixels().all(|p| p.0 == [10, 20, 30, 255]));
    }

    #[test]
    fn test_disc_covers_center_only_within_radius() {
        let mut surface = ImageSurface::new(20, 20);
        surface.clear(Color::new(0, 0, 0));
        surface.fill_disc(Vec2::new(10.0, 10.0), 3.0, Color::new(255, 0, 0));
        assert_eq!(surface.pixel(10, 10), Some(Color::new(255, 0, 0)));
        assert_eq!(surface.pixel(9, 9), Some(Color::new(255, 0, 0)));
        assert_eq!(surface.pixel(0, 0), Some(Color::new(0, 0, 0)));
        assert_eq!(surface.pixel(16, 10), Some(Color::new(0, 0, 0)));
    }

    #[test]
    fn test_disc_outside_image_is_ignored() {
        let mut surface = ImageSurface::new(8, 8);
        surface.clear(Color::new(0, 0, 0));
        surface.fill_disc(Vec2::new(-40.0, -40.0), 3.0, Color::new(255, 255, 255));
        surface.fill_disc(Vec2::new(f32::NAN, 2.0), 3.0, Color::new(255, 255, 255));
        assert!(surface.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_disc_clipped_at_edge() {
        let mut surface = ImageSurface::new(8, 8);
        surface.clear(Color::new(0, 0, 0));
        surface.fill_disc(Vec2::new(0.0, 0.0), 2.0, Color::new(0, 255, 0));
        assert_eq!(surface.pixel(0, 0), Some(Color::new(0, 255, 0)));
        assert_eq!(surface.pixel(7, 7), Some(Color::new(0, 0, 0)));
    }
}
