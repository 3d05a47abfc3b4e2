//! Assertion helpers for simulation output.

use kinetic_graphics::{BlendMode, DisplayList, DrawCommand, Rect};

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that `value` lies in `min..=max`.
pub fn assert_within(value: f32, min: f32, max: f32, msg: &str) {
    assert!(
        value >= min && value <= max,
        "{}: {} not in {}..={}",
        msg,
        value,
        min,
        max
    );
}

/// Assert that a rectangle is approximately equal to another.
pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
    assert_approx_eq(
        actual.width,
        expected.width,
        tolerance,
        &format!("{} - width", msg),
    );
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{} - height", msg),
    );
}

/// Number of circles drawn with `blend` in a display list.
pub fn count_circles(list: &DisplayList, blend: BlendMode) -> usize {
    list.commands()
        .iter()
        .filter(|command| matches!(command, DrawCommand::Circle { .. }) && command.blend() == blend)
        .count()
}

/// Assert that a display list starts by clearing the surface.
pub fn assert_starts_with_clear(list: &DisplayList, msg: &str) {
    assert_eq!(
        list.commands().first(),
        Some(&DrawCommand::Clear),
        "{}: display list does not start with a clear",
        msg
    );
}
