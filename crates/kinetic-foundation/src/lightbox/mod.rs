//! Gesture recognition for the full-screen image viewer.
//!
//! Mouse: a held press pans, a quick click closes, the wheel zooms
//! elastically. Touch: one finger pans, two fingers pinch, and pinching far
//! enough below the resting scale closes the viewer.

mod config;
mod recognizer;
mod transform;

pub use config::{LightboxConfig, ZoomBounds};
pub use recognizer::{GestureSession, LightboxGestures};
pub use transform::{LightboxEvent, LightboxEvents, ViewTransform};
