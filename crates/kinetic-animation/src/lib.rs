//! Animation math for Kinetic
//!
//! Two kinds of motion live here. Continuous physics (scroll, drift, color
//! convergence) uses frame-integrated exponential approach. Bounded one-shot
//! corrections (lightbox settle) use fixed-duration tweens the host eases.

mod approach;
mod easing;
mod tween;

pub use approach::*;
pub use easing::*;
pub use tween::*;

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
