//! Rendering pipeline for reconview.
//!
//! This crate turns prepared point clouds into 2D frames:
//! - [`TransformPipeline`] rotation and orthographic projection
//! - [`PreparedGeometry`] centered, color-resolved points built once per dataset
//! - [`FrameRenderer`] decimation, culling, depth ordering and disc drawing
//! - [`DrawSurface`] targets: [`RecordingSurface`] and the [`ImageSurface`] rasterizer
//! - [`RenderLoop`] cancellable frame scheduling
//! - frame export to PNG/JPEG

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod frame;
pub mod geometry;
pub mod raster;
pub mod scheduler;
pub mod screenshot;
pub mod surface;
pub mod transform;

pub use frame::{sort_back_to_front, FrameRenderer, FrameStats, RenderSettings, ScreenPoint};
pub use geometry::{adaptive_point_size, PreparedGeometry};
pub use raster::ImageSurface;
pub use scheduler::{FrameScheduler, FrameToken, ManualScheduler, RenderLoop};
pub use screenshot::{save_image, ExportError};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
pub use transform::{project, Projected, TransformPipeline, Viewport};
