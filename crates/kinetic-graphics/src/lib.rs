//! Pure math/data for drawing in Kinetic
//!
//! This crate contains geometry primitives, color definitions, brushes and
//! the drawing-command vocabulary the simulators emit for the host to paint.

mod brush;
mod color;
mod draw;
mod geometry;

pub use brush::*;
pub use color::*;
pub use draw::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::brush::Brush;
    pub use crate::color::{Color, Hsla};
    pub use crate::draw::{BlendMode, DisplayList, DrawCommand, DrawingSurface, Shadow};
    pub use crate::geometry::{Point, Rect, Size};
}
