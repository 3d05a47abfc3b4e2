//! Brush definitions for painting (solid colors, radial gradients)

use crate::color::Color;
use crate::geometry::Point;

#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(Color),
    /// Evenly spaced color stops from `center` out to `radius`.
    RadialGradient {
        colors: Vec<Color>,
        center: Point,
        radius: f32,
    },
}

impl Brush {
    pub fn solid(color: Color) -> Self {
        Brush::Solid(color)
    }

    pub fn radial_gradient(colors: Vec<Color>, center: Point, radius: f32) -> Self {
        Brush::RadialGradient {
            colors,
            center,
            radius,
        }
    }

    /// Gradient from `color` at the center to the same hue fully transparent.
    pub fn glow(color: Color, center: Point, radius: f32) -> Self {
        Brush::radial_gradient(vec![color, color.with_alpha(0.0)], center, radius)
    }
}
