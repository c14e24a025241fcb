//! Per-model display capabilities.
//!
//! Every reconstruction model gets a [`ModelProfile`] describing how it is
//! labelled and which color its points take when the producer sent no colors.

use std::collections::HashMap;

use crate::color::Color;

/// Key of the NeRF reconstruction model.
pub const NERF: &str = "nerf";

/// Key of the Gaussian Splatting reconstruction model.
pub const GAUSSIAN_SPLATTING: &str = "gaussian_splatting";

/// Color used for points of a model whose dataset carries no colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackColor {
    /// Every point takes the same color.
    Solid(Color),
    /// Points blend from `bottom` to `top` along the dataset's vertical extent.
    Gradient {
        /// Color at the lowest point.
        bottom: Color,
        /// Color at the highest point.
        top: Color,
    },
}

impl FallbackColor {
    /// Resolves the color at normalized height `t` (0 = bottom, 1 = top).
    #[must_use]
    pub fn at(&self, t: f32) -> Color {
        match *self {
            FallbackColor::Solid(color) => color,
            FallbackColor::Gradient { bottom, top } => bottom.lerp(top, t),
        }
    }
}

/// Display capabilities of one reconstruction model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelProfile {
    /// Label shown in model pickers and status displays.
    pub display_label: String,
    /// Color used when the dataset has no per-point colors.
    pub fallback_color: FallbackColor,
}

impl ModelProfile {
    /// Creates a profile.
    pub fn new(display_label: impl Into<String>, fallback_color: FallbackColor) -> Self {
        Self {
            display_label: display_label.into(),
            fallback_color,
        }
    }
}

/// Lookup table from model key to [`ModelProfile`].
///
/// Unknown keys resolve to a generic profile labelled with the key itself.
#[derive(Debug, Clone)]
pub struct ModelProfiles {
    profiles: HashMap<String, ModelProfile>,
    default_color: FallbackColor,
}

impl ModelProfiles {
    /// Creates a table holding the built-in profiles.
    #[must_use]
    pub fn new() -> Self {
        let mut table = Self {
            profiles: HashMap::new(),
            default_color: FallbackColor::Solid(Color::from_hex(0x10B981)),
        };
        table.register_defaults();
        table
    }

    fn register_defaults(&mut self) {
        self.register(
            NERF,
            ModelProfile::new(
                "NeRF (MiDaS)",
                FallbackColor::Solid(Color::from_hex(0x4F46E5)),
            ),
        );
        self.register(
            GAUSSIAN_SPLATTING,
            ModelProfile::new(
                "Gaussian Splatting",
                FallbackColor::Solid(Color::from_hex(0x10B981)),
            ),
        );
    }

    /// Registers or replaces the profile for `key`.
    pub fn register(&mut self, key: impl Into<String>, profile: ModelProfile) {
        self.profiles.insert(key.into(), profile);
    }

    /// Returns the profile for `key`, falling back to a generic one.
    #[must_use]
    pub fn get(&self, key: &str) -> ModelProfile {
        self.profiles
            .get(key)
            .cloned()
            .unwrap_or_else(|| ModelProfile::new(key, self.default_color))
    }

    /// Returns the display label for `key`.
    #[must_use]
    pub fn display_label(&self, key: &str) -> String {
        self.get(key).display_label
    }
}

impl Default for ModelProfiles {
    fn default() -> Self {
        Self::new()
    }
}
