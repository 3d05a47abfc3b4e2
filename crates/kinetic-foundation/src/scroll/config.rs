use kinetic_core::{ensure_positive, ensure_range, ConfigError};

/// Tunables for one momentum-scrolled surface.
///
/// Rates are per frame; the loop runs at display refresh.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollConfig {
    /// Wheel delta to target offset gain.
    pub wheel_gain: f32,
    /// Pointer travel to target offset gain while dragging.
    pub drag_gain: f32,
    /// Momentum multiplier applied every idle frame.
    pub momentum_decay: f32,
    /// Below this magnitude momentum stops and snapping takes over.
    pub momentum_threshold: f32,
    /// Release velocity is clamped to this magnitude.
    pub max_momentum: f32,
    /// Fraction of the remaining gap `current` closes per idle frame.
    pub idle_convergence: f32,
    /// Fraction closed per frame while dragging or scrubbing.
    pub active_convergence: f32,
    /// Fraction of the distance to the nearest snap point covered per frame.
    pub snap_strength: f32,
    /// Snapping is disabled when false; momentum still decays.
    pub snap_enabled: bool,
    /// Gaps below this (in pixels) are closed exactly.
    pub settle_epsilon: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            wheel_gain: 1.0,
            drag_gain: 1.2,
            momentum_decay: 0.97,
            momentum_threshold: 0.5,
            max_momentum: 120.0,
            idle_convergence: 0.08,
            active_convergence: 0.25,
            snap_strength: 0.06,
            snap_enabled: true,
            settle_epsilon: 0.1,
        }
    }
}

impl ScrollConfig {
    pub fn with_wheel_gain(mut self, gain: f32) -> Self {
        self.wheel_gain = gain;
        self
    }

    pub fn with_drag_gain(mut self, gain: f32) -> Self {
        self.drag_gain = gain;
        self
    }

    pub fn with_momentum_decay(mut self, decay: f32) -> Self {
        self.momentum_decay = decay;
        self
    }

    pub fn with_snap_strength(mut self, strength: f32) -> Self {
        self.snap_strength = strength;
        self
    }

    pub fn without_snapping(mut self) -> Self {
        self.snap_enabled = false;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("scroll.wheel_gain", self.wheel_gain)?;
        ensure_positive("scroll.drag_gain", self.drag_gain)?;
        ensure_range("scroll.momentum_decay", self.momentum_decay, 0.0, 0.999)?;
        ensure_positive("scroll.momentum_threshold", self.momentum_threshold)?;
        ensure_positive("scroll.max_momentum", self.max_momentum)?;
        ensure_range("scroll.idle_convergence", self.idle_convergence, 0.001, 1.0)?;
        ensure_range("scroll.active_convergence", self.active_convergence, 0.001, 1.0)?;
        ensure_range("scroll.snap_strength", self.snap_strength, 0.0, 1.0)?;
        ensure_positive("scroll.settle_epsilon", self.settle_epsilon)
    }

    /// Replaces invalid fields with defaults so construction never fails.
    pub(crate) fn sanitized(self) -> Self {
        if self.validate().is_ok() {
            return self;
        }
        log::warn!("invalid scroll config {self:?}; falling back to defaults where needed");
        let defaults = Self::default();
        let positive = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        let within = |value: f32, min: f32, max: f32, fallback: f32| {
            if (min..=max).contains(&value) {
                value
            } else {
                fallback
            }
        };
        Self {
            wheel_gain: positive(self.wheel_gain, defaults.wheel_gain),
            drag_gain: positive(self.drag_gain, defaults.drag_gain),
            momentum_decay: within(self.momentum_decay, 0.0, 0.999, defaults.momentum_decay),
            momentum_threshold: positive(self.momentum_threshold, defaults.momentum_threshold),
            max_momentum: positive(self.max_momentum, defaults.max_momentum),
            idle_convergence: within(self.idle_convergence, 0.001, 1.0, defaults.idle_convergence),
            active_convergence: within(
                self.active_convergence,
                0.001,
                1.0,
                defaults.active_convergence,
            ),
            snap_strength: within(self.snap_strength, 0.0, 1.0, defaults.snap_strength),
            snap_enabled: self.snap_enabled,
            settle_epsilon: positive(self.settle_epsilon, defaults.settle_epsilon),
        }
    }
}

/// Gains the handoff coordinator applies before routing input.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HandoffConfig {
    pub primary_wheel_gain: f32,
    pub secondary_wheel_gain: f32,
    /// Small so narrative text scrolls precisely under the finger.
    pub primary_drag_gain: f32,
    pub secondary_drag_gain: f32,
    /// Distance from a bound (pixels) that still counts as being at it.
    pub boundary_epsilon: f32,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            primary_wheel_gain: 0.6,
            secondary_wheel_gain: 1.0,
            primary_drag_gain: 0.5,
            secondary_drag_gain: 1.5,
            boundary_epsilon: 0.5,
        }
    }
}

impl HandoffConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("handoff.primary_wheel_gain", self.primary_wheel_gain)?;
        ensure_positive("handoff.secondary_wheel_gain", self.secondary_wheel_gain)?;
        ensure_positive("handoff.primary_drag_gain", self.primary_drag_gain)?;
        ensure_positive("handoff.secondary_drag_gain", self.secondary_drag_gain)?;
        ensure_range("handoff.boundary_epsilon", self.boundary_epsilon, 0.0, 100.0)
    }
}
