//! Shared gesture constants for consistent touch/pointer handling.
//!
//! These values are in logical pixels and milliseconds. Components receive
//! them through their config structs; the constants are the defaults.

use web_time::Duration;

/// Movement tolerance in logical pixels.
///
/// A touch that travels less than this between start and end still counts
/// as a tap (and can form a double-tap). Matches common platform touch slop.
pub const TAP_SLOP: f32 = 8.0;

/// How long a press must be held before the lightbox arms panning.
///
/// A press released sooner, without panning, closes the viewer.
pub const DRAG_HOLD_DELAY: Duration = Duration::from_millis(200);

/// Quiet period after the last wheel event before elastic zoom settles.
pub const WHEEL_SETTLE_DELAY: Duration = Duration::from_millis(150);

/// Two taps closer together than this form a double-tap.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

/// Pointer repulsion in the ambient field only applies while the pointer has
/// moved within this window.
pub const POINTER_ACTIVITY_WINDOW: Duration = Duration::from_millis(2000);

/// Minimum inter-finger distance used as a pinch baseline. Smaller starting
/// distances would make the scale ratio explode.
pub const MIN_PINCH_DISTANCE: f32 = 1.0;
