//! Drawing surfaces.
//!
//! The frame renderer only needs two primitives: clearing the surface and
//! filling a disc. Anything that provides them can be rendered into.

use glam::Vec2;
use reconview_core::Color;

use crate::transform::Viewport;

/// A 2D target the frame renderer draws into.
pub trait DrawSurface {
    /// Returns the drawable area.
    fn viewport(&self) -> Viewport;

    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Fills a disc of `radius` pixels centered at `center`.
    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color);
}

/// A draw call recorded by [`RecordingSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// The surface was cleared.
    Clear(Color),
    /// A disc was filled.
    Disc {
        /// Disc center in pixels.
        center: Vec2,
        /// Disc radius in pixels.
        radius: f32,
        /// Fill color.
        color: Color,
    },
}

/// A surface that records draw calls instead of rasterizing them.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    viewport: Viewport,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Creates an empty recording surface of the given size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            commands: Vec::new(),
        }
    }

    /// Returns every recorded command in order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns the recorded discs as `(center, radius, color)`.
    pub fn discs(&self) -> impl Iterator<Item = (Vec2, f32, Color)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Disc {
                center,
                radius,
                color,
            } => Some((center, radius, color)),
            DrawCommand::Clear(_) => None,
        })
    }

    /// Forgets every recorded command.
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            color,
        });
    }
}
