//! Input handling and scroll/gesture physics for Kinetic.
//!
//! - [`scroll::MomentumScroll`]: inertial scrolling with soft snapping for one surface
//! - [`scroll::NestedScroll`]: hands input from a narrative panel to an image panel
//! - [`lightbox::LightboxGestures`]: drag vs. pinch vs. tap for the image viewer

pub mod device;
pub mod gesture_constants;
pub mod geometry_query;
pub mod input;
pub mod lightbox;
pub mod scroll;

pub use device::{DeviceBreakpoints, DeviceClass};
pub use geometry_query::{ItemId, SurfaceGeometry};
pub use input::*;
pub use lightbox::{
    GestureSession, LightboxConfig, LightboxEvent, LightboxEvents, LightboxGestures, ViewTransform,
    ZoomBounds,
};
pub use scroll::{
    HandoffConfig, MomentumScroll, NestedScroll, ScrollConfig, ScrollSink, ScrollState,
};
