//! reconview: an interactive orbit viewer for point-cloud reconstructions.
//!
//! The viewer compares the outputs of several reconstruction models (for
//! example a NeRF depth-lifting pass and Gaussian Splatting) by rendering one
//! selected point cloud at a time with orbit, pan and zoom controls.
//!
//! # Quick Start
//!
//! ```no_run
//! use reconview::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let mut viewer = Viewer::headless(ViewerOptions::default());
//!     viewer.load_payload(r#"{"nerf": {"pointCloud": [0, 0, 0, 1, 1, 1]}}"#)?;
//!     render_to_file(&mut viewer, "nerf.png", 800, 600)?;
//!     Ok(())
//! }
//! ```
//!
//! # Driving a window
//!
//! A windowed front end owns a [`FrameScheduler`] backed by its event loop,
//! forwards pointer events through [`WinitInputBridge`] into
//! [`Viewer::handle_pointer`], and calls [`Viewer::on_frame`] with each fired
//! frame token and a [`DrawSurface`]. [`Viewer::teardown`] cancels the pending
//! frame when the surface goes away.

// Documentation lints - internal functions don't need exhaustive error docs
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

mod headless;
pub mod input;
pub mod loader;
pub mod viewer;
pub mod winit_bridge;

pub use headless::{render_to_file, render_to_image};
pub use input::{
    CursorIcon, DragState, EventResponse, InputController, PointerButton, PointerEvent,
};
pub use loader::GeometrySlot;
pub use viewer::{Viewer, ViewerStatus};
pub use winit_bridge::WinitInputBridge;

// Re-export core types
pub use reconview_core::{
    CameraState, Color, DecodedPayload, FallbackColor, ModelProfile, ModelProfiles,
    ModelRegistry, PointCloudDataset, RawDataset, Result, ViewerError, ViewerOptions,
    ZoomLimits, GAUSSIAN_SPLATTING, NERF,
};

// Re-export render types
pub use reconview_render::{
    DrawCommand, DrawSurface, FrameRenderer, FrameScheduler, FrameStats, FrameToken,
    ImageSurface, ManualScheduler, PreparedGeometry, RecordingSurface, RenderLoop,
    RenderSettings, TransformPipeline, Viewport,
};

pub use glam::{Vec2, Vec3};

/// Initializes logging from the `RUST_LOG` environment variable.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::try_init();
    log::debug!("reconview {} logging initialized", env!("CARGO_PKG_VERSION"));
}
