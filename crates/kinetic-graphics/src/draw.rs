//! Drawing commands emitted by the simulators.
//!
//! The host owns the real drawing surface; simulators record a
//! [`DisplayList`] per frame and hand it to a [`DrawingSurface`] to paint in
//! order.

use crate::brush::Brush;
use crate::color::Color;
use crate::geometry::{Point, Size};

/// How a command composites onto pixels already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    #[default]
    SourceOver,
    /// Additive: overlapping draws brighten each other.
    Lighter,
    /// Subtractive: erases destination pixels where the source is opaque.
    DestinationOut,
}

/// Blurred drop shadow used as a glow around a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub blur: f32,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Clears the whole surface to transparent.
    Clear,
    Circle {
        center: Point,
        radius: f32,
        brush: Brush,
        blend: BlendMode,
        shadow: Option<Shadow>,
    },
}

impl DrawCommand {
    pub fn blend(&self) -> BlendMode {
        match self {
            DrawCommand::Clear => BlendMode::SourceOver,
            DrawCommand::Circle { blend, .. } => *blend,
        }
    }
}

/// Ordered commands for one frame of one drawing surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Starts a new frame: forgets previous commands and records a clear.
    pub fn reset(&mut self, size: Size) {
        self.size = size;
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    pub fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush) {
        self.fill_circle_with(center, radius, brush, BlendMode::SourceOver, None);
    }

    pub fn fill_circle_with(
        &mut self,
        center: Point,
        radius: f32,
        brush: Brush,
        blend: BlendMode,
        shadow: Option<Shadow>,
    ) {
        if !(radius.is_finite() && radius > 0.0 && center.is_finite()) {
            return;
        }
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            brush,
            blend,
            shadow,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Host drawing surface (a canvas) a simulator paints into.
pub trait DrawingSurface {
    /// Current pixel size of the surface; empty while unmounted.
    fn size(&self) -> Size;

    fn paint(&mut self, list: &DisplayList);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_starts_frame_with_clear() {
        let mut list = DisplayList::default();
        list.fill_circle(Point::new(1.0, 1.0), 4.0, Brush::solid(Color::WHITE));
        list.reset(Size::new(100.0, 100.0));
        assert_eq!(list.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn degenerate_circles_are_dropped() {
        let mut list = DisplayList::new(Size::new(10.0, 10.0));
        list.fill_circle(Point::ZERO, 0.0, Brush::solid(Color::WHITE));
        list.fill_circle(Point::new(f32::NAN, 0.0), 3.0, Brush::solid(Color::WHITE));
        assert!(list.is_empty());
    }
}
