//! Frame-integrated exponential approach.
//!
//! Each call moves a value a fixed fraction of the remaining distance toward
//! its target, which is the shared integration step of every simulator.

use crate::easing::Lerp;

/// Moves `current` by `fraction` of the remaining distance to `target`.
pub fn approach<T: Lerp>(current: &T, target: &T, fraction: f32) -> T {
    current.lerp(target, fraction.clamp(0.0, 1.0))
}

/// Outcome of [`approach_or_snap`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approach {
    pub value: f32,
    /// True when the gap was under epsilon and the value snapped to target.
    pub settled: bool,
}

/// Like [`approach`] but lands exactly on `target` once within `epsilon`,
/// so values never drift forever in sub-pixel steps.
pub fn approach_or_snap(current: f32, target: f32, fraction: f32, epsilon: f32) -> Approach {
    let gap = target - current;
    if gap.abs() < epsilon {
        Approach {
            value: target,
            settled: true,
        }
    } else {
        Approach {
            value: current + gap * fraction.clamp(0.0, 1.0),
            settled: false,
        }
    }
}

/// Approach on a circle of degrees, taking the shorter way around.
/// The result is wrapped into `[0, 360)`.
pub fn approach_degrees(current: f32, target: f32, fraction: f32) -> f32 {
    let mut gap = (target - current).rem_euclid(360.0);
    if gap > 180.0 {
        gap -= 360.0;
    }
    (current + gap * fraction.clamp(0.0, 1.0)).rem_euclid(360.0)
}
