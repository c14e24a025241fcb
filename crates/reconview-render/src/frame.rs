//! Per-frame point-cloud rendering.
//!
//! A frame is produced with the painter's algorithm:
//! 1. take every n-th point of the prepared geometry (fixed stride, so the
//!    same subset is drawn every frame),
//! 2. project it and drop it if it lands outside the viewport margin,
//! 3. sort the survivors farthest first,
//! 4. draw each as a disc whose radius shrinks with depth.

use glam::Vec2;
use reconview_core::{CameraState, Color, ViewerOptions};

use crate::geometry::PreparedGeometry;
use crate::surface::DrawSurface;
use crate::transform::{TransformPipeline, Viewport};

/// Tunables of the frame renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Background color.
    pub background: Color,
    /// Only every n-th point is drawn.
    pub stride: usize,
    /// Cull margin around the viewport, in pixels.
    pub cull_margin: f32,
    /// Disc radius at depth 0.
    pub base_size: f32,
    /// Radius lost per unit of depth.
    pub depth_falloff: f32,
    /// Smallest disc radius.
    pub min_size: f32,
}

impl RenderSettings {
    /// Extracts the renderer settings from the viewer options.
    #[must_use]
    pub fn from_options(options: &ViewerOptions) -> Self {
        Self {
            background: options.background_color,
            stride: options.decimation_stride.max(1),
            cull_margin: options.cull_margin,
            base_size: options.base_point_size,
            depth_falloff: options.depth_falloff,
            min_size: options.min_point_size,
        }
    }

    /// Disc radius for a point at `depth`.
    #[must_use]
    pub fn point_radius(&self, depth: f32) -> f32 {
        (self.base_size - depth * self.depth_falloff).max(self.min_size)
    }

    fn with_valid_stride(mut self) -> Self {
        self.stride = self.stride.max(1);
        self
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::from_options(&ViewerOptions::default())
    }
}

/// A projected point ready to be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// Screen position in pixels.
    pub position: Vec2,
    /// View-space depth; larger is further away.
    pub depth: f32,
    /// Fill color.
    pub color: Color,
    /// Index of the point in the prepared geometry.
    pub index: usize,
}

/// Counters describing one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Points kept by decimation.
    pub retained: usize,
    /// Retained points dropped because they fell outside the margin.
    pub culled: usize,
    /// Discs drawn.
    pub drawn: usize,
}

/// Renders prepared geometry into a [`DrawSurface`].
///
/// The renderer keeps a scratch buffer between frames so steady-state frames
/// do not allocate.
#[derive(Debug, Default)]
pub struct FrameRenderer {
    settings: RenderSettings,
    scratch: Vec<ScreenPoint>,
}

impl FrameRenderer {
    /// Creates a renderer with the given settings.
    ///
    /// A stride of 0 is treated as 1.
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings: settings.with_valid_stride(),
            scratch: Vec::new(),
        }
    }

    /// Returns the settings.
    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Replaces the settings. A stride of 0 is treated as 1.
    pub fn set_settings(&mut self, settings: RenderSettings) {
        self.settings = settings.with_valid_stride();
    }

    /// Renders one frame.
    ///
    /// Without geometry the surface is only cleared.
    pub fn render(
        &mut self,
        geometry: Option<&PreparedGeometry>,
        camera: &CameraState,
        surface: &mut dyn DrawSurface,
    ) -> FrameStats {
        surface.clear(self.settings.background);
        let Some(geometry) = geometry else {
            return FrameStats::default();
        };

        let viewport = surface.viewport();
        let mut points = std::mem::take(&mut self.scratch);
        let mut stats = self.collect(geometry, camera, viewport, &mut points);

        for point in &points {
            let radius = self.settings.point_radius(point.depth);
            surface.fill_disc(point.position, radius, point.color);
        }
        stats.drawn = points.len();

        points.clear();
        self.scratch = points;
        stats
    }

    /// Projects, culls and depth-sorts the visible points without drawing them.
    #[must_use]
    pub fn project_frame(
        &self,
        geometry: &PreparedGeometry,
        camera: &CameraState,
        viewport: Viewport,
    ) -> Vec<ScreenPoint> {
        let mut points = Vec::new();
        self.collect(geometry, camera, viewport, &mut points);
        points
    }

    fn collect(
        &self,
        geometry: &PreparedGeometry,
        camera: &CameraState,
        viewport: Viewport,
        out: &mut Vec<ScreenPoint>,
    ) -> FrameStats {
        let transform = TransformPipeline::new(camera, viewport);
        let mut stats = FrameStats::default();

        for (index, point) in geometry
            .points()
            .iter()
            .enumerate()
            .step_by(self.settings.stride)
        {
            stats.retained += 1;
            let projected = transform.project(*point);
            if !projected.depth.is_finite()
                || !viewport.contains_with_margin(projected.screen, self.settings.cull_margin)
            {
                stats.culled += 1;
                continue;
            }
            out.push(ScreenPoint {
                position: projected.screen,
                depth: projected.depth,
                color: geometry.colors()[index],
                index,
            });
        }

        sort_back_to_front(out);
        stats
    }
}

/// Sorts points farthest first.
///
/// The sort is stable, so points at equal depth keep their decimation order.
pub fn sort_back_to_front(points: &mut [ScreenPoint]) {
    points.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use reconview_core::{ModelProfiles, PointCloudDataset};

    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn geometry(points: Vec<Vec3>, colors: Option<Vec<Vec3>>) -> PreparedGeometry {
        let ds = PointCloudDataset::new("nerf", points, colors).unwrap();
        PreparedGeometry::new(&ds, &ModelProfiles::new().get("nerf"))
    }

    fn every_point() -> RenderSettings {
        RenderSettings {
            stride: 1,
            ..RenderSettings::default()
        }
    }

    #[test]
    fn test_idle_frame_only_clears() {
        let mut renderer = FrameRenderer::default();
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let stats = renderer.render(None, &CameraState::default(), &mut surface);
        assert_eq!(stats, FrameStats::default());
        assert_eq!(
            surface.commands(),
            &[DrawCommand::Clear(Color::from_hex(0x1A1A1A))]
        );
    }

    #[test]
    fn test_decimation_takes_every_tenth_point() {
        let points: Vec<Vec3> = (0..25).map(|i| Vec3::new(i as f32 * 0.01, 0.0, 0.0)).collect();
        let geometry = geometry(points, None);
        let renderer = FrameRenderer::default();
        let frame = renderer.project_frame(&geometry, &CameraState::default(), Viewport::new(800.0, 600.0));
        let mut indices: Vec<usize> = frame.iter().map(|p| p.index).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 10, 20]);
    }

    #[test]
    fn test_zero_stride_draws_every_point() {
        let geometry = geometry(vec![Vec3::ZERO, Vec3::X, Vec3::Y], None);
        let zero_stride = RenderSettings {
            stride: 0,
            ..RenderSettings::default()
        };
        let mut renderer = FrameRenderer::new(zero_stride);
        assert_eq!(renderer.settings().stride, 1);

        let mut surface = RecordingSurface::new(100.0, 100.0);
        let stats = renderer.render(Some(&geometry), &CameraState::default(), &mut surface);
        assert_eq!(stats.drawn, 3);

        renderer.set_settings(zero_stride);
        let stats = renderer.render(Some(&geometry), &CameraState::default(), &mut surface);
        assert_eq!(stats.retained, 3);
    }

    #[test]
    fn test_far_points_drawn_first() {
        let geometry = geometry(
            vec![
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(0.1, 0.0, 1.0),
                Vec3::new(0.2, 0.0, 0.0),
            ],
            None,
        );
        let renderer = FrameRenderer::new(every_point());
        let frame = renderer.project_frame(&geometry, &CameraState::default(), Viewport::new(800.0, 600.0));
        let depths: Vec<f32> = frame.iter().map(|p| p.depth).collect();
        assert_eq!(depths, vec![1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_ties_keep_decimation_order() {
        let geometry = geometry(
            vec![Vec3::new(-0.5, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.5, 0.0, 0.0)],
            None,
        );
        let renderer = FrameRenderer::new(every_point());
        let frame = renderer.project_frame(&geometry, &CameraState::default(), Viewport::new(800.0, 600.0));
        let indices: Vec<usize> = frame.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let geometry = geometry(
            (0..50)
                .map(|i| Vec3::new((i % 7) as f32 * 0.1, (i % 3) as f32 * 0.1, (i % 5) as f32 * 0.1))
                .collect(),
            None,
        );
        let renderer = FrameRenderer::new(every_point());
        let mut camera = CameraState::default();
        camera.orbit(0.7, 0.3);
        let frame = renderer.project_frame(&geometry, &camera, Viewport::new(800.0, 600.0));
        let mut again = frame.clone();
        sort_back_to_front(&mut again);
        assert_eq!(frame, again);
    }

    #[test]
    fn test_points_outside_margin_are_culled() {
        let geometry = geometry(vec![Vec3::new(-10.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)], None);
        let mut renderer = FrameRenderer::new(every_point());
        let mut surface = RecordingSurface::new(200.0, 200.0);
        let stats = renderer.render(Some(&geometry), &CameraState::default(), &mut surface);
        assert_eq!(stats, FrameStats { retained: 2, culled: 2, drawn: 0 });
        assert_eq!(surface.discs().count(), 0);
    }

    #[test]
    fn test_radius_shrinks_with_depth() {
        let settings = RenderSettings::default();
        assert_eq!(settings.point_radius(0.0), 3.0);
        assert!(settings.point_radius(-1.0) > settings.point_radius(1.0));
        assert_eq!(settings.point_radius(100.0), 1.0);
    }

    #[test]
    fn test_mid_intensity_colors_are_uniform_under_rotation() {
        let points: Vec<Vec3> = (0..40).map(|i| Vec3::new(i as f32 * 0.02, 0.1, -0.3)).collect();
        let colors = vec![Vec3::splat(0.5); points.len()];
        let geometry = geometry(points, Some(colors));
        let mut renderer = FrameRenderer::new(every_point());
        for (yaw, pitch) in [(0.0, 0.0), (1.3, -0.4), (-2.0, 1.2)] {
            let mut camera = CameraState::default();
            camera.orbit(yaw, pitch);
            let mut surface = RecordingSurface::new(800.0, 600.0);
            renderer.render(Some(&geometry), &camera, &mut surface);
            assert!(surface.discs().count() > 0);
            assert!(surface.discs().all(|(_, _, c)| c == Color::new(127, 127, 127)));
        }
    }

    #[test]
    fn test_scratch_buffer_is_reused() {
        let geometry = geometry(vec![Vec3::ZERO, Vec3::ONE], None);
        let mut renderer = FrameRenderer::new(every_point());
        let mut surface = RecordingSurface::new(800.0, 600.0);
        renderer.render(Some(&geometry), &CameraState::default(), &mut surface);
        let capacity = renderer.scratch.capacity();
        renderer.render(Some(&geometry), &CameraState::default(), &mut surface);
        assert_eq!(renderer.scratch.capacity(), capacity);
        assert!(renderer.scratch.is_empty());
    }
}
