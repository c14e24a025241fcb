//! Geometry preparation off the render path.
//!
//! Preparing a dataset (centering, color resolution) runs once per swap. It
//! can run inline or on a worker thread; either way the finished geometry is
//! published as one `Arc` so a frame never sees a partly built buffer.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use reconview_core::{ModelProfile, PointCloudDataset};
use reconview_render::PreparedGeometry;

/// Geometry currently bound for rendering, tagged with the swap that built it.
#[derive(Debug, Default)]
pub struct GeometrySlot {
    generation: u64,
    bound: Option<Arc<PreparedGeometry>>,
    pending: Option<PendingGeometry>,
}

impl GeometrySlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases the bound geometry and abandons any in-flight preparation.
    pub fn release(&mut self) {
        self.generation += 1;
        self.pending = None;
        if let Some(geometry) = self.bound.take() {
            log::debug!("released geometry for '{}'", geometry.model_name());
        }
    }

    /// Releases the current geometry and prepares `dataset` in its place.
    pub fn bind(
        &mut self,
        dataset: Arc<PointCloudDataset>,
        profile: ModelProfile,
        in_background: bool,
    ) {
        self.release();
        if in_background {
            self.pending = Some(PendingGeometry::spawn(self.generation, dataset, profile));
        } else {
            self.publish(Arc::new(PreparedGeometry::new(&dataset, &profile)));
        }
    }

    /// Publishes background results that finished since the last call.
    ///
    /// Returns true if new geometry was bound.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };
        match pending.try_take() {
            Ok(Some((generation, geometry))) if generation == self.generation => {
                self.pending = None;
                self.publish(geometry);
                true
            }
            Ok(Some(_)) => {
                self.pending = None;
                false
            }
            Ok(None) => false,
            Err(()) => {
                log::warn!("geometry preparation worker exited without a result");
                self.pending = None;
                false
            }
        }
    }

    /// Blocks until in-flight preparation finishes or `timeout` elapses.
    ///
    /// Returns true if geometry is bound afterwards.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        if let Some(pending) = self.pending.take() {
            match pending.receiver.recv_timeout(timeout) {
                Ok((generation, geometry)) if generation == self.generation => {
                    self.publish(geometry);
                }
                Ok(_) => {}
                Err(mpsc::RecvTimeoutError::Timeout) => self.pending = Some(pending),
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    log::warn!("geometry preparation worker exited without a result");
                }
            }
        }
        self.bound.is_some()
    }

    /// Returns the bound geometry.
    #[must_use]
    pub fn geometry(&self) -> Option<&Arc<PreparedGeometry>> {
        self.bound.as_ref()
    }

    fn publish(&mut self, geometry: Arc<PreparedGeometry>) {
        log::debug!(
            "bound geometry for '{}' ({} points, point size {})",
            geometry.model_name(),
            geometry.len(),
            geometry.point_size()
        );
        self.bound = Some(geometry);
    }
}

/// Geometry being prepared on a worker thread.
#[derive(Debug)]
pub struct PendingGeometry {
    receiver: Receiver<(u64, Arc<PreparedGeometry>)>,
}

impl PendingGeometry {
    fn spawn(generation: u64, dataset: Arc<PointCloudDataset>, profile: ModelProfile) -> Self {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let geometry = Arc::new(PreparedGeometry::new(&dataset, &profile));
            // The viewer may have moved on; a closed channel is fine.
            let _ = sender.send((generation, geometry));
        });
        Self { receiver }
    }

    fn try_take(&self) -> Result<Option<(u64, Arc<PreparedGeometry>)>, ()> {
        match self.receiver.try_recv() {
            Ok(result) => Ok(Some(result)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(()),
        }
    }
}
