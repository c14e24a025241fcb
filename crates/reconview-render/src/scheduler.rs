//! Frame scheduling.
//!
//! The render loop asks a [`FrameScheduler`] for one future frame at a time.
//! Platforms implement the trait on top of their refresh callback (a window's
//! redraw request, a display link, a timer); [`ManualScheduler`] fires frames
//! on demand for headless use and tests.

use std::collections::VecDeque;

/// Identifies one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    /// Creates a token from a raw id.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Source of future frame callbacks.
pub trait FrameScheduler {
    /// Requests one future frame and returns its token.
    fn request_frame(&mut self) -> FrameToken;

    /// Cancels a previously requested frame. Unknown tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// A scheduler whose frames fire only when [`ManualScheduler::fire_next`] is
/// called.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: VecDeque<FrameToken>,
}

impl ManualScheduler {
    /// Creates a scheduler with no pending frames.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the oldest pending frame.
    pub fn fire_next(&mut self) -> Option<FrameToken> {
        self.pending.pop_front()
    }

    /// Returns the number of pending frames.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.next_id);
        self.next_id += 1;
        self.pending.push_back(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.retain(|t| *t != token);
    }
}

/// Self-rescheduling render loop state.
///
/// The loop holds at most one pending frame. Starting an already running loop
/// is a no-op, stopping cancels the pending frame, and a frame only counts if
/// its token matches the pending one, so a frame that fires after
/// [`RenderLoop::stop`] is ignored.
#[derive(Debug)]
pub struct RenderLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameToken>,
}

impl<S: FrameScheduler> RenderLoop<S> {
    /// Creates a stopped loop.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Returns true if a frame is pending.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the pending frame token.
    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Requests the first frame if none is pending.
    pub fn start(&mut self) {
        if self.pending.is_none() {
            let token = self.scheduler.request_frame();
            log::trace!("requested frame {}", token.raw());
            self.pending = Some(token);
        }
    }

    /// Cancels the pending frame.
    pub fn stop(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel_frame(token);
            log::debug!("render loop stopped (cancelled frame {})", token.raw());
        }
    }

    /// Accepts a fired frame.
    ///
    /// Returns true if `token` was the pending frame; the loop then has no
    /// pending frame until [`RenderLoop::start`] is called again.
    pub fn begin_frame(&mut self, token: FrameToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            log::debug!("ignoring stale frame {}", token.raw());
            false
        }
    }


    /// Returns the scheduler mutably.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<S: FrameScheduler> Drop for RenderLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
