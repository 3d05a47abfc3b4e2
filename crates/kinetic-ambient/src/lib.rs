//! Ambient canvas simulations for Kinetic.
//!
//! - [`field::AmbientField`]: wandering glow spots with pointer repulsion and
//!   click shockwaves
//! - [`trail::PointerTrail`]: ring-shaped ripples behind the cursor
//!
//! Both are [`FrameComponent`](kinetic_core::FrameComponent)s that paint a
//! fresh [`DisplayList`](kinetic_graphics::DisplayList) to a host
//! [`DrawingSurface`](kinetic_graphics::DrawingSurface) every frame.

pub mod color;
pub mod config;
pub mod field;
pub mod trail;

pub use color::ColorFollower;
pub use config::{CountRange, FieldConfig, RippleStyle, TrailConfig};
pub use field::{AmbientField, Spot};
pub use kinetic_foundation::{DeviceBreakpoints, DeviceClass};
pub use trail::{PointerTrail, Ripple, RippleSample};
