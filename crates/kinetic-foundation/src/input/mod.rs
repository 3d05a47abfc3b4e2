//! Raw input events delivered by the host.

mod types;

pub use types::{
    PointerButton, PointerButtons, PointerEvent, PointerEventKind, TouchEvent, TouchId, TouchList,
    TouchPhase, TouchPoint, WheelEvent,
};
