//! Orbit camera state.
//!
//! The camera orbits a fixed look-at point at the origin. Rotation is stored as
//! two angles, panning as a screen-space pixel offset and zoom as a uniform
//! scale factor between world units and pixels.

use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

/// Default zoom applied on construction and reset.
pub const DEFAULT_ZOOM: f32 = 80.0;

/// Inclusive bounds for the camera zoom factor.
///
/// The bounds are always finite and ordered; deserialization goes through
/// [`ZoomLimits::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ZoomRange")]
pub struct ZoomLimits {
    min: f32,
    max: f32,
}

#[derive(Deserialize)]
struct ZoomRange {
    min: f32,
    max: f32,
}

impl From<ZoomRange> for ZoomLimits {
    fn from(range: ZoomRange) -> Self {
        Self::new(range.min, range.max)
    }
}

impl ZoomLimits {
    /// Creates zoom limits, swapping the bounds if they are given out of order.
    ///
    /// Non-finite bounds fall back to the default limits.
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        if !min.is_finite() || !max.is_finite() {
            return Self::default();
        }
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Smallest allowed zoom.
    #[must_use]
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Largest allowed zoom.
    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Clamps a zoom value into these limits.
    #[must_use]
    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min, self.max)
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: 10.0,
            max: 200.0,
        }
    }
}

/// Current orbit/pan/zoom parameters of the viewer camera.
///
/// All setters keep the fields inside their bounds: `rotation_x` within
/// `[-π/2, π/2]` and `zoom` within the configured [`ZoomLimits`]. Non-finite
/// inputs are ignored. Deserialized cameras are clamped the same way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "CameraPose")]
pub struct CameraState {
    rotation_x: f32,
    rotation_y: f32,
    zoom: f32,
    pan_x: f32,
    pan_y: f32,
    zoom_limits: ZoomLimits,
    default_zoom: f32,
}

#[derive(Deserialize)]
struct CameraPose {
    rotation_x: f32,
    rotation_y: f32,
    zoom: f32,
    pan_x: f32,
    pan_y: f32,
    #[serde(default)]
    zoom_limits: ZoomLimits,
    #[serde(default = "default_zoom")]
    default_zoom: f32,
}

fn default_zoom() -> f32 {
    DEFAULT_ZOOM
}

impl From<CameraPose> for CameraState {
    fn from(pose: CameraPose) -> Self {
        let mut camera = Self::with_default_zoom(pose.zoom_limits, pose.default_zoom);
        camera.set_rotation_x(pose.rotation_x);
        camera.set_rotation_y(pose.rotation_y);
        camera.set_zoom(pose.zoom);
        camera.set_pan(pose.pan_x, pose.pan_y);
        camera
    }
}

impl CameraState {
    /// Creates a camera at the default pose with the given zoom limits.
    #[must_use]
    pub fn new(zoom_limits: ZoomLimits) -> Self {
        Self::with_default_zoom(zoom_limits, DEFAULT_ZOOM)
    }

    /// Creates a camera whose reset pose uses `default_zoom`.
    #[must_use]
    pub fn with_default_zoom(zoom_limits: ZoomLimits, default_zoom: f32) -> Self {
        let default_zoom = if default_zoom.is_finite() {
            zoom_limits.clamp(default_zoom)
        } else {
            zoom_limits.clamp(DEFAULT_ZOOM)
        };
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            zoom: default_zoom,
            pan_x: 0.0,
            pan_y: 0.0,
            zoom_limits,
            default_zoom,
        }
    }

    /// Rotation around the horizontal axis, in radians.
    #[must_use]
    pub fn rotation_x(&self) -> f32 {
        self.rotation_x
    }

    /// Rotation around the vertical axis, in radians.
    #[must_use]
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Uniform world-to-pixel scale factor.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Horizontal pixel offset of the orbit center.
    #[must_use]
    pub fn pan_x(&self) -> f32 {
        self.pan_x
    }

    /// Vertical pixel offset of the orbit center.
    #[must_use]
    pub fn pan_y(&self) -> f32 {
        self.pan_y
    }

    /// Returns the zoom limits.
    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        self.zoom_limits
    }

    /// Sets the horizontal-axis rotation, clamping to `[-π/2, π/2]`.
    pub fn set_rotation_x(&mut self, radians: f32) {
        if radians.is_finite() {
            self.rotation_x = radians.clamp(-FRAC_PI_2, FRAC_PI_2);
        }
    }

    /// Sets the vertical-axis rotation.
    pub fn set_rotation_y(&mut self, radians: f32) {
        if radians.is_finite() {
            self.rotation_y = radians;
        }
    }

    /// Sets the zoom, clamping to the zoom limits.
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.zoom = self.zoom_limits.clamp(zoom);
        }
    }

    /// Sets the pan offset.
    pub fn set_pan(&mut self, pan_x: f32, pan_y: f32) {
        if pan_x.is_finite() && pan_y.is_finite() {
            self.pan_x = pan_x;
            self.pan_y = pan_y;
        }
    }

    /// Orbits by the given angles (radians).
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        if !delta_yaw.is_finite() || !delta_pitch.is_finite() {
            return;
        }
        self.set_rotation_y(self.rotation_y + delta_yaw);
        self.set_rotation_x(self.rotation_x + delta_pitch);
    }

    /// Pans by the given pixel offsets.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        self.set_pan(self.pan_x + delta_x, self.pan_y + delta_y);
    }

    /// Multiplies the zoom by `factor`, clamping to the zoom limits.
    pub fn scale_zoom(&mut self, factor: f32) {
        self.set_zoom(self.zoom * factor);
    }

    /// Replaces the zoom limits and re-clamps the current and default zoom.
    pub fn set_zoom_limits(&mut self, limits: ZoomLimits) {
        self.zoom_limits = limits;
        self.zoom = limits.clamp(self.zoom);
        self.default_zoom = limits.clamp(self.default_zoom);
    }

    /// Restores the default pose.
    pub fn reset(&mut self) {
        self.rotation_x = 0.0;
        self.rotation_y = 0.0;
        self.zoom = self.default_zoom;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}
