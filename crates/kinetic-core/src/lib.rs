//! Frame scheduling primitives for Kinetic.
//!
//! Every simulation in the engine is driven by a [`FrameLoop`] registered on a
//! shared [`FrameClock`]. The host drains the clock once per display refresh
//! and each loop runs its component in measure, integrate, publish order.

mod change;
mod error;
mod frame_clock;
mod frame_loop;
mod timer;

pub use change::{ChangeGate, FloatGate};
pub use error::{ensure_finite, ensure_ordered, ensure_positive, ensure_range, ConfigError};
pub use frame_clock::{FrameCallbackId, FrameCallbackRegistration, FrameClock};
pub use frame_loop::{run_frame, FrameComponent, FrameLoop};
pub use timer::{ActivityWindow, Timer};

pub use web_time::{Duration, Instant};
