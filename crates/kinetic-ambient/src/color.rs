//! Slow colour convergence toward the host accent.

use kinetic_animation::{approach, approach_degrees};
use kinetic_graphics::{Color, Hsla};

/// HSLA value that drifts toward a target at a fixed per-frame rate.
///
/// The host may swap the accent between any two frames; the follower only
/// moves its target, so the rendered colour never jumps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorFollower {
    current: Hsla,
    target: Hsla,
    rate: f32,
}

impl ColorFollower {
    pub fn new(initial: Hsla, rate: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            rate,
        }
    }

    pub fn current(&self) -> Hsla {
        self.current
    }

    pub fn target(&self) -> Hsla {
        self.target
    }

    pub fn set_target(&mut self, target: Hsla) {
        self.target = target;
    }

    pub fn set_accent(&mut self, accent: Color, alpha: f32) {
        self.set_target(accent.to_hsla().with_alpha(alpha));
    }

    /// Hue takes the short way around the colour wheel. Greys carry no
    /// meaningful hue, so a grey endpoint adopts the other side's hue
    /// instead of sweeping through the spectrum.
    pub fn step(&mut self) {
        let grey_current = self.current.s <= f32::EPSILON;
        let grey_target = self.target.s <= f32::EPSILON;
        let (from_hue, to_hue) = match (grey_current, grey_target) {
            (true, false) => (self.target.h, self.target.h),
            (false, true) => (self.current.h, self.current.h),
            _ => (self.current.h, self.target.h),
        };
        self.current = Hsla::new(
            approach_degrees(from_hue, to_hue, self.rate),
            approach(&self.current.s, &self.target.s, self.rate),
            approach(&self.current.l, &self.target.l, self.rate),
            approach(&self.current.a, &self.target.a, self.rate),
        );
    }
}
