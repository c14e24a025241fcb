//! 3D-to-2D point transform.
//!
//! Points are rotated around the vertical axis, then around the horizontal
//! axis, and projected orthographically with a uniform scale. The rotated
//! z-coordinate is kept as a depth value used only for draw ordering.

use glam::{Vec2, Vec3};
use reconview_core::CameraState;

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Screen position of the orbit center for the given camera.
    #[must_use]
    pub fn center(&self, camera: &CameraState) -> Vec2 {
        Vec2::new(
            self.width / 2.0 + camera.pan_x(),
            self.height / 2.0 + camera.pan_y(),
        )
    }

    /// Checks whether `screen` lies within `margin` pixels of the viewport.
    #[must_use]
    pub fn contains_with_margin(&self, screen: Vec2, margin: f32) -> bool {
        screen.x >= -margin
            && screen.x <= self.width + margin
            && screen.y >= -margin
            && screen.y <= self.height + margin
    }
}

/// A point after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Screen position in pixels (y grows downwards).
    pub screen: Vec2,
    /// Rotated z-coordinate; larger values are further away.
    pub depth: f32,
}

/// Rotation and projection for one camera pose.
///
/// The trigonometric terms are computed once per frame; [`Self::project`] is
/// then a handful of multiply-adds per point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformPipeline {
    cos_x: f32,
    sin_x: f32,
    cos_y: f32,
    sin_y: f32,
    zoom: f32,
    center: Vec2,
}

impl TransformPipeline {
    /// Builds the transform for `camera` drawing into `viewport`.
    #[must_use]
    pub fn new(camera: &CameraState, viewport: Viewport) -> Self {
        let (sin_x, cos_x) = camera.rotation_x().sin_cos();
        let (sin_y, cos_y) = camera.rotation_y().sin_cos();
        Self {
            cos_x,
            sin_x,
            cos_y,
            sin_y,
            zoom: camera.zoom(),
            center: viewport.center(camera),
        }
    }

    /// Rotates `point` into view space.
    #[must_use]
    pub fn rotate(&self, point: Vec3) -> Vec3 {
        let rx = point.x * self.cos_y - point.z * self.sin_y;
        let rz1 = point.x * self.sin_y + point.z * self.cos_y;
        let ry = point.y * self.cos_x - rz1 * self.sin_x;
        let rz = point.y * self.sin_x + rz1 * self.cos_x;
        Vec3::new(rx, ry, rz)
    }

    /// Projects `point` to screen space.
    #[must_use]
    pub fn project(&self, point: Vec3) -> Projected {
        let rotated = self.rotate(point);
        Projected {
            screen: Vec2::new(
                self.center.x + rotated.x * self.zoom,
                self.center.y - rotated.y * self.zoom,
            ),
            depth: rotated.z,
        }
    }
}

/// Projects a single point; see [`TransformPipeline`].
#[must_use]
pub fn project(point: Vec3, camera: &CameraState, viewport: Viewport) -> Projected {
    TransformPipeline::new(camera, viewport).project(point)
}
