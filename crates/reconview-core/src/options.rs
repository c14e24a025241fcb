//! Configuration options for the viewer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::{ZoomLimits, DEFAULT_ZOOM};
use crate::color::Color;
use crate::error::Result;

/// Viewer configuration.
///
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    /// Color the surface is cleared to before each frame.
    pub background_color: Color,

    /// Only every n-th point is drawn (1 draws every point).
    pub decimation_stride: usize,

    /// Points projected further than this many pixels outside the viewport are culled.
    pub cull_margin: f32,

    /// Disc radius of a point at depth 0.
    pub base_point_size: f32,

    /// Radius lost per unit of depth.
    pub depth_falloff: f32,

    /// Smallest disc radius.
    pub min_point_size: f32,

    /// Radians of rotation per pixel of primary-button drag.
    pub rotate_sensitivity: f32,

    /// Zoom multiplier for a wheel step with non-positive delta (scroll up).
    pub zoom_in_factor: f32,

    /// Zoom multiplier for a wheel step with positive delta (scroll down).
    pub zoom_out_factor: f32,

    /// Zoom bounds.
    pub zoom_limits: ZoomLimits,

    /// Zoom of the default (reset) pose.
    pub default_zoom: f32,

    /// Build render geometry on a worker thread instead of inline.
    pub prepare_in_background: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            background_color: Color::from_hex(0x1A1A1A),
            decimation_stride: 10,
            cull_margin: 50.0,
            base_point_size: 3.0,
            depth_falloff: 0.3,
            min_point_size: 1.0,
            rotate_sensitivity: 0.01,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            zoom_limits: ZoomLimits::default(),
            default_zoom: DEFAULT_ZOOM,
            prepare_in_background: false,
        }
    }
}

impl ViewerOptions {
    /// Parses options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        Ok(options.sanitized())
    }

    /// Reads options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serializes the options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replaces values that would break rendering with their defaults.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.decimation_stride == 0 {
            log::warn!("decimation_stride must be at least 1; using {}", defaults.decimation_stride);
            self.decimation_stride = defaults.decimation_stride;
        }
        if !self.min_point_size.is_finite() || self.min_point_size <= 0.0 {
            self.min_point_size = defaults.min_point_size;
        }
        self
    }
}
