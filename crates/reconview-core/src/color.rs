//! 8-bit display colors.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from a `0xRRGGBB` literal.
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Converts channel intensities in `[0, 1]` to a display color.
    ///
    /// Out-of-range channels are clipped to the nearest bound and `NaN` maps to 0.
    #[must_use]
    pub fn from_unit(rgb: Vec3) -> Self {
        Self {
            r: unit_to_byte(rgb.x),
            g: unit_to_byte(rgb.y),
            b: unit_to_byte(rgb.z),
        }
    }

    /// Linearly blends towards `other` by `t` (clamped to `[0, 1]`).
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Self {
            r: lerp_channel(self.r, other.r, t),
            g: lerp_channel(self.g, other.g, t),
            b: lerp_channel(self.b, other.b, t),
        }
    }

    /// Returns the color as an `[r, g, b, a]` array with full opacity.
    #[must_use]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    let (a, b) = (f32::from(a), f32::from(b));
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_byte(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).floor() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex(0x4F46E5), Color::new(0x4F, 0x46, 0xE5));
    }

    #[test]
    fn test_from_unit_floors() {
        assert_eq!(Color::from_unit(Vec3::splat(0.5)), Color::new(127, 127, 127));
        assert_eq!(Color::from_unit(Vec3::ONE), Color::new(255, 255, 255));
    }

    #[test]
    fn test_from_unit_clips_out_of_range() {
        let c = Color::from_unit(Vec3::new(-0.5, 1.5, 3.0));
        assert_eq!(c, Color::new(0, 255, 255));
    }

    #[test]
    fn test_from_unit_nan_is_zero() {
        let c = Color::from_unit(Vec3::new(f32::NAN, 1.0, f32::NAN));
        assert_eq!(c, Color::new(0, 255, 0));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::new(0, 0, 0);
        let b = Color::new(255, 255, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_lerp_keeps_exact_channels() {
        let indigo = Color::from_hex(0x4F46E5);
        assert_eq!(indigo.lerp(Color::from_hex(0x10B981), 0.0), indigo);
    }
}
