//! Headless rendering.
//!
//! Renders the viewer's current state to an image buffer or file without a
//! window. Useful for integration tests, batch comparisons of reconstructions
//! and automated screenshots.

use std::path::Path;
use std::time::Duration;

use image::RgbaImage;
use reconview_core::{Result, ViewerError};
use reconview_render::{FrameScheduler, ImageSurface};

use crate::viewer::Viewer;

/// How long to wait for background geometry before rendering anyway.
const GEOMETRY_TIMEOUT: Duration = Duration::from_secs(30);

/// Renders the current state to an RGBA image.
///
/// Background geometry preparation is awaited first, so the active model is
/// always drawn if one is selected. The render loop is not touched.
///
/// # Example
/// ```no_run
/// use reconview::*;
///
/// let mut viewer = Viewer::headless(ViewerOptions::default());
/// viewer.set_datasets([("nerf".to_string(), RawDataset::new(vec![0.0, 0.0, 0.0], None))]);
/// let image = render_to_image(&mut viewer, 800, 600).unwrap();
/// assert_eq!(image.dimensions(), (800, 600));
/// ```
pub fn render_to_image<S: FrameScheduler>(
    viewer: &mut Viewer<S>,
    width: u32,
    height: u32,
) -> Result<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(ViewerError::Export(format!(
            "invalid image size {width}x{height}"
        )));
    }
    if viewer.registry().active_model().is_some() && !viewer.wait_for_geometry(GEOMETRY_TIMEOUT) {
        log::warn!("geometry not ready after {GEOMETRY_TIMEOUT:?}; rendering background only");
    }

    let mut surface = ImageSurface::new(width, height);
    let stats = viewer.render(&mut surface);
    log::debug!(
        "headless frame {width}x{height}: {} drawn, {} culled",
        stats.drawn,
        stats.culled
    );
    Ok(surface.into_image())
}

/// Renders the current state and saves it as a PNG or JPEG file.
pub fn render_to_file<S: FrameScheduler>(
    viewer: &mut Viewer<S>,
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
) -> Result<()> {
    let image = render_to_image(viewer, width, height)?;
    reconview_render::save_image(path, &image)
        .map_err(|e| ViewerError::Export(e.to_string()))
}
