//! Pointer and wheel handling.
//!
//! - Primary drag: orbit (yaw from horizontal motion, pitch from vertical)
//! - Secondary drag: pan by the pointer delta in pixels
//! - Wheel: multiplicative zoom

use glam::Vec2;
use reconview_core::{CameraState, ViewerOptions};

/// Pointer button that started a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left button; rotates.
    Primary,
    /// Usually the right button; pans.
    Secondary,
    /// Any other button; tracked but does not move the camera.
    Other(u16),
}

/// Platform-independent input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A button was pressed at `position`.
    Down {
        /// Button pressed.
        button: PointerButton,
        /// Pointer position in pixels.
        position: Vec2,
    },
    /// The pointer moved to `position`.
    Move {
        /// Pointer position in pixels.
        position: Vec2,
    },
    /// The button was released.
    Up,
    /// The pointer left the render surface.
    Leave,
    /// The wheel turned.
    Wheel {
        /// Vertical scroll amount; positive scrolls down (towards the user)
        /// and zooms out.
        delta_y: f32,
    },
    /// The platform is about to open a context menu.
    ContextMenu,
}

/// Cursor shape the platform should show over the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorIcon {
    /// Idle, ready to drag.
    Grab,
    /// A drag is in progress.
    Grabbing,
}

/// Side effects the platform layer should apply after an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Suppress the platform's default action (scrolling, context menu).
    pub prevent_default: bool,
    /// New cursor shape, if it changed.
    pub cursor: Option<CursorIcon>,
    /// Whether the camera was modified.
    pub camera_changed: bool,
}

/// Transient drag state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    /// No button held.
    #[default]
    Idle,
    /// A button is held; `last` is the most recent pointer position.
    Dragging {
        /// Button that started the drag.
        button: PointerButton,
        /// Last observed pointer position.
        last: Vec2,
    },
}

/// Converts pointer and wheel events into camera changes.
#[derive(Debug, Clone)]
pub struct InputController {
    drag: DragState,
    rotate_sensitivity: f32,
    zoom_in_factor: f32,
    zoom_out_factor: f32,
}

impl InputController {
    /// Creates a controller using the sensitivities from `options`.
    #[must_use]
    pub fn new(options: &ViewerOptions) -> Self {
        Self {
            drag: DragState::Idle,
            rotate_sensitivity: options.rotate_sensitivity,
            zoom_in_factor: options.zoom_in_factor,
            zoom_out_factor: options.zoom_out_factor,
        }
    }

    /// Returns the current drag state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Applies `event` to `camera`.
    pub fn handle(&mut self, camera: &mut CameraState, event: PointerEvent) -> EventResponse {
        match event {
            PointerEvent::Down { button, position } => {
                self.drag = DragState::Dragging {
                    button,
                    last: position,
                };
                EventResponse {
                    cursor: Some(CursorIcon::Grabbing),
                    ..EventResponse::default()
                }
            }
            PointerEvent::Move { position } => self.drag_to(camera, position),
            PointerEvent::Up | PointerEvent::Leave => {
                self.drag = DragState::Idle;
                EventResponse {
                    cursor: Some(CursorIcon::Grab),
                    ..EventResponse::default()
                }
            }
            PointerEvent::Wheel { delta_y } => {
                let before = camera.zoom();
                if delta_y.is_finite() {
                    let factor = if delta_y > 0.0 {
                        self.zoom_out_factor
                    } else {
                        self.zoom_in_factor
                    };
                    camera.scale_zoom(factor);
                }
                EventResponse {
                    prevent_default: true,
                    camera_changed: camera.zoom() != before,
                    ..EventResponse::default()
                }
            }
            PointerEvent::ContextMenu => EventResponse {
                prevent_default: true,
                ..EventResponse::default()
            },
        }
    }

    fn drag_to(&mut self, camera: &mut CameraState, position: Vec2) -> EventResponse {
        let DragState::Dragging { button, last } = self.drag else {
            return EventResponse::default();
        };
        let delta = position - last;
        let before = *camera;

        match button {
            PointerButton::Primary => {
                camera.orbit(
                    delta.x * self.rotate_sensitivity,
                    delta.y * self.rotate_sensitivity,
                );
            }
            PointerButton::Secondary => camera.pan(delta.x, delta.y),
            PointerButton::Other(_) => {}
        }

        self.drag = DragState::Dragging {
            button,
            last: position,
        };
        EventResponse {
            camera_changed: *camera != before,
            ..EventResponse::default()
        }
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(&ViewerOptions::default())
    }
}
