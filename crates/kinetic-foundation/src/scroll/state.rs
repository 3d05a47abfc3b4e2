/// Integration state of one scrollable surface.
///
/// `current` and `target` always lie in `[0, max_scroll]`; every mutator
/// clamps. `max_scroll` is refreshed from live measurements each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub(crate) current: f32,
    pub(crate) target: f32,
    pub(crate) velocity: f32,
    pub(crate) momentum: f32,
    pub(crate) is_pointer_down: bool,
    pub(crate) is_dragging: bool,
    pub(crate) is_programmatic_scrub: bool,
    pub(crate) max_scroll: f32,
}

impl ScrollState {
    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn momentum(&self) -> f32 {
        self.momentum
    }

    pub fn is_pointer_down(&self) -> bool {
        self.is_pointer_down
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn is_programmatic_scrub(&self) -> bool {
        self.is_programmatic_scrub
    }

    pub fn max_scroll(&self) -> f32 {
        self.max_scroll
    }

    /// Position within the content as a fraction in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.max_scroll > 0.0 {
            (self.current / self.max_scroll).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Whether `target` can still move in the direction of `delta`.
    pub fn has_room(&self, delta: f32, epsilon: f32) -> bool {
        if delta > 0.0 {
            self.target < self.max_scroll - epsilon
        } else if delta < 0.0 {
            self.target > epsilon
        } else {
            false
        }
    }

    pub(crate) fn set_max_scroll(&mut self, max_scroll: f32) {
        self.max_scroll = sanitize_extent(max_scroll);
        self.clamp();
    }

    pub(crate) fn clamp(&mut self) {
        self.current = clamp_offset(self.current, self.max_scroll);
        self.target = clamp_offset(self.target, self.max_scroll);
    }

    /// Returns to the top and forgets any motion. Bounds are kept.
    pub(crate) fn reset(&mut self) {
        *self = Self {
            max_scroll: self.max_scroll,
            ..Self::default()
        };
    }
}

/// Malformed extents (NaN, infinite, negative) collapse to zero.
pub(crate) fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn clamp_offset(value: f32, max_scroll: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, max_scroll)
    } else {
        0.0
    }
}
