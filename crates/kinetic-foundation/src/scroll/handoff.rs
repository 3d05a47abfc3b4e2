//! Scroll handoff between a narrative panel and an image panel.
//!
//! Input scrolls the primary (narrative) surface until it runs out of room
//! in the requested direction, then falls through to the secondary (image)
//! surface. Wheel routing is decided per event; drag routing latches for
//! the rest of the gesture once it has passed to the secondary.

use kinetic_core::{run_frame, FrameComponent};
use web_time::Instant;

use super::config::HandoffConfig;
use super::momentum::MomentumScroll;

pub struct NestedScroll {
    primary: MomentumScroll,
    secondary: MomentumScroll,
    config: HandoffConfig,
    pass_to_secondary: bool,
    last_pointer_y: Option<f32>,
}

impl NestedScroll {
    pub fn new(primary: MomentumScroll, secondary: MomentumScroll, config: HandoffConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("invalid handoff config ({err}); using defaults");
                HandoffConfig::default()
            }
        };
        Self {
            primary,
            secondary,
            config,
            pass_to_secondary: false,
            last_pointer_y: None,
        }
    }

    pub fn primary(&self) -> &MomentumScroll {
        &self.primary
    }

    pub fn primary_mut(&mut self) -> &mut MomentumScroll {
        &mut self.primary
    }

    pub fn secondary(&self) -> &MomentumScroll {
        &self.secondary
    }

    pub fn secondary_mut(&mut self) -> &mut MomentumScroll {
        &mut self.secondary
    }

    /// Whether the current (or last) drag gesture has fallen through to the
    /// secondary surface.
    pub fn passed_to_secondary(&self) -> bool {
        self.pass_to_secondary
    }

    /// Returns the secondary surface to the top, e.g. when its image set
    /// changes.
    pub fn reset_secondary(&mut self) {
        self.secondary.reset();
    }

    pub fn on_wheel(&mut self, delta_y: f32) {
        if !delta_y.is_finite() {
            return;
        }
        if self.primary.has_room(delta_y, self.config.boundary_epsilon) {
            self.primary
                .scroll_by(delta_y * self.config.primary_wheel_gain);
        } else {
            self.secondary
                .scroll_by(delta_y * self.config.secondary_wheel_gain);
        }
    }

    pub fn on_drag_start(&mut self, pointer_y: f32) {
        if !pointer_y.is_finite() {
            return;
        }
        self.pass_to_secondary = false;
        self.last_pointer_y = Some(pointer_y);
        self.primary.begin_drag();
        self.secondary.halt();
    }

    pub fn on_drag_move(&mut self, pointer_y: f32) {
        let Some(last) = self.last_pointer_y else {
            return;
        };
        if !pointer_y.is_finite() {
            return;
        }
        self.last_pointer_y = Some(pointer_y);
        let delta = last - pointer_y;
        if delta == 0.0 {
            return;
        }

        if !self.pass_to_secondary && self.primary.has_room(delta, self.config.boundary_epsilon) {
            self.primary.drag_by(delta * self.config.primary_drag_gain);
            return;
        }

        if self.pass_to_secondary {
            self.secondary
                .drag_by(delta * self.config.secondary_drag_gain);
            return;
        }

        log::debug!("primary exhausted; handing drag to secondary");
        self.pass_to_secondary = true;
        // Finger speed the primary was tracking, in secondary units.
        let carried = self.primary.state().velocity() / self.config.primary_drag_gain
            * self.config.secondary_drag_gain;
        self.primary.end_drag(false);
        self.secondary.begin_drag();
        self.secondary
            .drag_by(delta * self.config.secondary_drag_gain);
        if carried != 0.0 {
            self.secondary.carry_velocity(carried);
        }
    }

    /// Ends the gesture; only the surface that was receiving input gets
    /// release momentum.
    pub fn on_drag_end(&mut self) {
        if self.last_pointer_y.take().is_none() {
            return;
        }
        if self.pass_to_secondary {
            self.primary.end_drag(false);
            self.secondary.end_drag(true);
        } else {
            self.primary.end_drag(true);
            self.secondary.end_drag(false);
        }
    }
}

impl FrameComponent for NestedScroll {
    fn integrate(&mut self, frame_time: Instant) {
        run_frame(&mut self.primary, frame_time);
        run_frame(&mut self.secondary, frame_time);
    }
}
