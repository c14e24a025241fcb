//! Translation of winit window events into viewer input.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::input::{CursorIcon, PointerButton, PointerEvent};

/// Pixels per wheel line when a device reports pixel deltas.
const PIXELS_PER_LINE: f64 = 100.0;

/// Tracks the cursor position between winit events, since button events do
/// not carry one.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinitInputBridge {
    cursor: Vec2,
}

impl WinitInputBridge {
    /// Creates a bridge with the cursor at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last known cursor position.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Converts a window event, returning `None` for events the viewer ignores.
    #[allow(clippy::cast_possible_truncation)]
    pub fn translate(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => Some(PointerEvent::Down {
                    button: pointer_button(*button),
                    position: self.cursor,
                }),
                ElementState::Released => Some(PointerEvent::Up),
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                Some(PointerEvent::Move {
                    position: self.cursor,
                })
            }
            WindowEvent::CursorLeft { .. } => Some(PointerEvent::Leave),
            WindowEvent::MouseWheel { delta, .. } => Some(PointerEvent::Wheel {
                delta_y: wheel_delta_y(*delta),
            }),
            _ => None,
        }
    }
}

/// Maps a winit mouse button to a pointer button.
///
/// Non-primary, non-secondary buttons keep DOM-style numbering: middle is 1,
/// back 3, forward 4.
#[must_use]
pub fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Other(1),
        MouseButton::Back => PointerButton::Other(3),
        MouseButton::Forward => PointerButton::Other(4),
        MouseButton::Other(id) => PointerButton::Other(id),
    }
}

/// Converts a winit scroll delta to the viewer's wheel convention.
///
/// winit reports positive values when scrolling up; the viewer expects
/// positive values when scrolling down.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn wheel_delta_y(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y,
        MouseScrollDelta::PixelDelta(position) => (-position.y / PIXELS_PER_LINE) as f32,
    }
}

/// Maps the viewer's cursor affordance to a winit cursor icon.
#[must_use]
pub fn cursor_icon(icon: CursorIcon) -> winit::window::CursorIcon {
    match icon {
        CursorIcon::Grab => winit::window::CursorIcon::Grab,
        CursorIcon::Grabbing => winit::window::CursorIcon::Grabbing,
    }
}
