//! The viewer session.
//!
//! A [`Viewer`] ties the pieces together: it owns the camera, the input
//! controller, the model registry, the bound render geometry and the render
//! loop. Platforms feed it input events and fired frames; everything runs on
//! the caller's thread.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reconview_core::{
    decode_payload, CameraState, ModelProfiles, ModelRegistry, PointCloudDataset, RawDataset,
    Result, ViewerError, ViewerOptions,
};
use reconview_render::{
    DrawSurface, FrameRenderer, FrameScheduler, FrameStats, FrameToken, ManualScheduler,
    PreparedGeometry, RenderLoop, RenderSettings,
};

use crate::input::{EventResponse, InputController, PointerEvent};
use crate::loader::GeometrySlot;

/// Read-only snapshot of the viewer for status displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerStatus {
    /// Number of points in the active dataset.
    pub num_points: usize,
    /// Number of color triples in the active dataset.
    pub color_count: usize,
    /// Current zoom.
    pub zoom: f32,
    /// Active model key.
    pub active_model: Option<String>,
    /// Display label of the active model.
    pub active_label: Option<String>,
    /// Every registered model key.
    pub available_models: Vec<String>,
    /// Most recent error, if any.
    pub error: Option<String>,
}

/// An interactive point-cloud viewer session.
pub struct Viewer<S: FrameScheduler = ManualScheduler> {
    options: ViewerOptions,
    camera: CameraState,
    input: InputController,
    registry: ModelRegistry,
    profiles: ModelProfiles,
    renderer: FrameRenderer,
    geometry: GeometrySlot,
    render_loop: RenderLoop<S>,
    model_errors: BTreeMap<String, ViewerError>,
    last_error: Option<String>,
    torn_down: bool,
}

impl Viewer<ManualScheduler> {
    /// Creates a viewer whose frames are fired manually.
    #[must_use]
    pub fn headless(options: ViewerOptions) -> Self {
        Self::new(options, ManualScheduler::new())
    }
}

impl<S: FrameScheduler> Viewer<S> {
    /// Creates a viewer with no datasets.
    pub fn new(options: ViewerOptions, scheduler: S) -> Self {
        let options = options.sanitized();
        Self {
            camera: CameraState::with_default_zoom(options.zoom_limits, options.default_zoom),
            input: InputController::new(&options),
            registry: ModelRegistry::new(),
            profiles: ModelProfiles::new(),
            renderer: FrameRenderer::new(RenderSettings::from_options(&options)),
            geometry: GeometrySlot::new(),
            render_loop: RenderLoop::new(scheduler),
            model_errors: BTreeMap::new(),
            last_error: None,
            torn_down: false,
            options,
        }
    }

    /// Replaces the options, keeping the current camera pose where it fits.
    pub fn set_options(&mut self, options: ViewerOptions) {
        let options = options.sanitized();
        self.camera.set_zoom_limits(options.zoom_limits);
        self.input = InputController::new(&options);
        self.renderer.set_settings(RenderSettings::from_options(&options));
        self.options = options;
    }

    /// Returns the camera.
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Returns the model registry.
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Returns the model profiles for registering custom models.
    pub fn profiles_mut(&mut self) -> &mut ModelProfiles {
        &mut self.profiles
    }

    /// Returns the geometry bound for rendering.
    pub fn active_geometry(&self) -> Option<&Arc<PreparedGeometry>> {
        self.geometry.geometry()
    }

    /// Returns the error recorded for a rejected model.
    pub fn model_error(&self, model: &str) -> Option<&ViewerError> {
        self.model_errors.get(model)
    }

    /// Returns every rejected model with its error.
    pub fn model_errors(&self) -> &BTreeMap<String, ViewerError> {
        &self.model_errors
    }

    /// Replaces every dataset with the given raw entries.
    ///
    /// Each entry is validated on its own: rejected models are recorded (see
    /// [`Viewer::model_error`]) and the rest are registered. Returns the number
    /// of accepted models.
    pub fn set_datasets<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (String, RawDataset)>,
    {
        let mut errors = BTreeMap::new();
        let mut accepted = Vec::new();
        for (name, raw) in entries {
            match PointCloudDataset::from_raw(name.clone(), raw) {
                Ok(dataset) => accepted.push(dataset),
                Err(e) => {
                    log::warn!("rejected model '{name}': {e}");
                    errors.insert(name, e);
                }
            }
        }
        self.replace(accepted, errors)
    }

    /// Decodes a reconstruction payload and replaces every dataset with it.
    ///
    /// A payload reporting failure clears the viewer and returns the error.
    pub fn load_payload(&mut self, json: &str) -> Result<usize> {
        let decoded = match decode_payload(json) {
            Ok(decoded) => decoded,
            Err(e) => {
                self.clear();
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        let mut errors = decoded.errors;
        let mut accepted = Vec::new();
        for (name, raw) in decoded.entries {
            match PointCloudDataset::from_raw(name.clone(), raw) {
                Ok(dataset) => accepted.push(dataset),
                Err(e) => {
                    log::warn!("rejected model '{name}': {e}");
                    errors.insert(name, e);
                }
            }
        }
        Ok(self.replace(accepted, errors))
    }

    /// Removes every dataset and stops the render loop.
    pub fn clear(&mut self) {
        self.geometry.release();
        self.registry.clear();
        self.model_errors.clear();
        self.last_error = None;
        self.render_loop.stop();
        log::info!("viewer cleared");
    }

    /// Makes `key` the active model.
    ///
    /// Fails with [`ViewerError::InvalidSelection`] when `key` is not
    /// registered; the current model stays active.
    pub fn select_model(&mut self, key: &str) -> Result<()> {
        if self.registry.active_model() == Some(key) {
            return Ok(());
        }
        if let Err(e) = self.registry.select_model(key) {
            log::warn!("{e}");
            self.last_error = Some(e.to_string());
            return Err(e);
        }
        log::info!("selected model '{key}'");
        self.bind_active();
        Ok(())
    }

    /// Applies a pointer or wheel event to the camera.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> EventResponse {
        self.input.handle(&mut self.camera, event)
    }

    /// Restores the default camera pose.
    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    /// Handles a fired frame.
    ///
    /// Renders only if `token` is the frame this viewer is waiting for, then
    /// schedules the next frame while a dataset is active. Returns the frame
    /// statistics, or `None` for a stale or post-teardown frame.
    pub fn on_frame(
        &mut self,
        token: FrameToken,
        surface: &mut dyn DrawSurface,
    ) -> Option<FrameStats> {
        if self.torn_down || !self.render_loop.begin_frame(token) {
            return None;
        }
        let stats = self.render(surface);
        if self.registry.active_dataset().is_some() {
            self.render_loop.start();
        }
        Some(stats)
    }

    /// Renders one frame of the current state, outside the render loop.
    pub fn render(&mut self, surface: &mut dyn DrawSurface) -> FrameStats {
        self.geometry.poll();
        self.renderer
            .render(self.geometry.geometry().map(Arc::as_ref), &self.camera, surface)
    }

    /// Blocks until background geometry preparation finishes or `timeout` elapses.
    ///
    /// Returns true if geometry is bound.
    pub fn wait_for_geometry(&mut self, timeout: Duration) -> bool {
        self.geometry.wait(timeout)
    }

    /// Returns true while a frame is scheduled.
    pub fn is_running(&self) -> bool {
        self.render_loop.is_running()
    }

    /// Returns the pending frame token.
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.render_loop.pending()
    }

    /// Returns the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        self.render_loop.scheduler_mut()
    }

    /// Cancels the pending frame and releases render resources.
    ///
    /// Frames that fire afterwards are ignored.
    pub fn teardown(&mut self) {
        self.render_loop.stop();
        self.geometry.release();
        self.torn_down = true;
        log::info!("viewer torn down");
    }

    /// Returns a snapshot for status displays.
    pub fn status(&self) -> ViewerStatus {
        let active = self.registry.active_dataset();
        ViewerStatus {
            num_points: active.map_or(0, |d| d.num_points()),
            color_count: active.map_or(0, |d| d.color_count()),
            zoom: self.camera.zoom(),
            active_model: self.registry.active_model().map(str::to_string),
            active_label: self
                .registry
                .active_model()
                .map(|key| self.profiles.display_label(key)),
            available_models: self.registry.model_names().map(str::to_string).collect(),
            error: self.last_error.clone(),
        }
    }

    fn replace(
        &mut self,
        accepted: Vec<PointCloudDataset>,
        errors: BTreeMap<String, ViewerError>,
    ) -> usize {
        self.geometry.release();
        let count = accepted.len();
        let active = self.registry.set_datasets(accepted).map(str::to_string);
        self.last_error = errors.values().next().map(ToString::to_string);
        self.model_errors = errors;
        log::info!(
            "loaded {count} model(s), {} rejected, active: {}",
            self.model_errors.len(),
            active.as_deref().unwrap_or("none")
        );
        self.bind_active();
        count
    }

    fn bind_active(&mut self) {
        match self.registry.active_dataset() {
            Some(dataset) if !self.torn_down => {
                let profile = self.profiles.get(dataset.model_name());
                self.geometry.bind(
                    Arc::clone(dataset),
                    profile,
                    self.options.prepare_in_background,
                );
                self.render_loop.start();
            }
            _ => {
                self.geometry.release();
                self.render_loop.stop();
            }
        }
    }
}
