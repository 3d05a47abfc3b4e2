//! Momentum scrolling and scroll handoff.

mod config;
mod handoff;
mod momentum;
mod state;

pub use config::{HandoffConfig, ScrollConfig};
pub use handoff::NestedScroll;
pub use momentum::{MomentumScroll, ScrollSink};
pub use state::ScrollState;
