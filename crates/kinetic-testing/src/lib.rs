//! Testing utilities for Kinetic
//!
//! Fake host surfaces that record what the engine publishes, and a frame
//! driver that advances a [`FrameClock`](kinetic_core::FrameClock) with a
//! deterministic timeline.

pub mod assertions;
pub mod driver;
pub mod surface;

pub use assertions::*;
pub use driver::FrameDriver;
pub use surface::{FakeScrollSurface, RecordingSurface};

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::driver::FrameDriver;
    pub use crate::surface::{FakeScrollSurface, RecordingSurface};
}
