//! Render-ready geometry built once per dataset.
//!
//! Preparing a dataset centers its points on the origin, resolves per-point
//! colors and picks a point size from the point count. The result is immutable
//! and shared behind an `Arc`, so a swap replaces it as a whole.

use glam::Vec3;
use reconview_core::{bounding_box, Color, FallbackColor, ModelProfile, PointCloudDataset};

/// Point size (world units) for datasets with more than 3000 points.
pub const POINT_SIZE_DENSE: f32 = 0.02;
/// Point size (world units) for datasets with more than 1000 points.
pub const POINT_SIZE_MEDIUM: f32 = 0.03;
/// Point size (world units) for smaller datasets.
pub const POINT_SIZE_SPARSE: f32 = 0.05;

/// Chooses a world-space point size from the number of points.
#[must_use]
pub fn adaptive_point_size(num_points: usize) -> f32 {
    if num_points > 3000 {
        POINT_SIZE_DENSE
    } else if num_points > 1000 {
        POINT_SIZE_MEDIUM
    } else {
        POINT_SIZE_SPARSE
    }
}

/// A dataset translated to the origin, with colors resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedGeometry {
    model_name: String,
    points: Vec<Vec3>,
    colors: Vec<Color>,
    point_size: f32,
}

impl PreparedGeometry {
    /// Prepares `dataset` for rendering with the model's `profile`.
    ///
    /// Points are translated so the bounding-box center sits at the origin.
    /// Dataset colors are clipped to `[0, 1]`; without them every point takes
    /// the profile's fallback color.
    #[must_use]
    pub fn new(dataset: &PointCloudDataset, profile: &ModelProfile) -> Self {
        let (min, max) = dataset.bounding_box();
        let center = (min + max) * 0.5;
        let points: Vec<Vec3> = dataset.points().iter().map(|p| *p - center).collect();
        let bounds = bounding_box(&points);

        let colors = match dataset.colors() {
            Some(colors) => colors.iter().map(|c| Color::from_unit(*c)).collect(),
            None => fallback_colors(&points, bounds, profile.fallback_color),
        };

        log::debug!(
            "prepared '{}': {} points, center offset {:?}",
            dataset.model_name(),
            points.len(),
            center
        );

        Self {
            model_name: dataset.model_name().to_string(),
            point_size: adaptive_point_size(points.len()),
            points,
            colors,
        }
    }

    /// Returns the name of the model this geometry was built from.
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns the centered points.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Returns the resolved per-point colors.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// World-space point size, chosen from the point count.
    #[must_use]
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn fallback_colors(points: &[Vec3], bounds: (Vec3, Vec3), fallback: FallbackColor) -> Vec<Color> {
    match fallback {
        FallbackColor::Solid(color) => vec![color; points.len()],
        FallbackColor::Gradient { .. } => {
            let (min, max) = bounds;
            let height = max.y - min.y;
            points
                .iter()
                .map(|p| {
                    let t = if height > 0.0 { (p.y - min.y) / height } else { 0.5 };
                    fallback.at(t)
                })
                .collect()
        }
    }
}
