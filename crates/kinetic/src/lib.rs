//! Kinetic: the interaction-physics engine behind a motion-heavy portfolio.
//!
//! Raw pointer, touch and wheel input goes in; scroll offsets, progress,
//! active items, lightbox transforms and drawing commands come out. Every
//! simulation is a [`FrameComponent`] stepped by a [`FrameLoop`] on one
//! [`FrameClock`] that the host drains once per display refresh.
//!
//! [`MotionEngine`] wires the components together; the individual crates are
//! re-exported for hosts that want to drive a single component directly.

mod config;
mod engine;

pub use config::MotionConfig;
pub use engine::{Mounted, MotionEngine, SurfaceId};

pub use kinetic_ambient::{
    AmbientField, ColorFollower, CountRange, FieldConfig, PointerTrail, Ripple, RippleSample,
    RippleStyle, Spot, TrailConfig,
};
pub use kinetic_animation::{
    approach, approach_degrees, approach_or_snap, ease_out_cubic, AnimationSpec, Approach,
    Easing, Lerp, Transition,
};
pub use kinetic_core::{
    run_frame, ActivityWindow, ChangeGate, ConfigError, Duration, FloatGate, FrameClock,
    FrameComponent, FrameLoop, Instant, Timer,
};
pub use kinetic_foundation::*;
pub use kinetic_graphics::{
    BlendMode, Brush, Color, DisplayList, DrawCommand, DrawingSurface, Hsla, Point, Rect, Shadow,
    Size,
};

pub mod prelude {
    pub use crate::config::MotionConfig;
    pub use crate::engine::{Mounted, MotionEngine};
    pub use kinetic_core::{FrameClock, FrameComponent, FrameLoop, Instant};
    pub use kinetic_foundation::{
        DeviceClass, ItemId, LightboxEvent, PointerEvent, ScrollSink, SurfaceGeometry,
        TouchEvent, TouchPoint, WheelEvent,
    };
    pub use kinetic_graphics::prelude::*;
}
