//! Change gates used when publishing frame outputs to the host.
//!
//! The host re-renders whenever it is told about a new value, so outputs are
//! only forwarded when they differ from what was last published.

/// Forwards a value only when it differs from the last one forwarded.
#[derive(Clone, Debug)]
pub struct ChangeGate<T> {
    last: Option<T>,
}

impl<T> Default for ChangeGate<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: PartialEq + Clone> ChangeGate<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` (and remembers `value`) when it should be published.
    pub fn update(&mut self, value: &T) -> bool {
        if self.last.as_ref() == Some(value) {
            return false;
        }
        self.last = Some(value.clone());
        true
    }

    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Float variant of [`ChangeGate`] that ignores differences below `epsilon`.
#[derive(Clone, Copy, Debug)]
pub struct FloatGate {
    last: Option<f32>,
    epsilon: f32,
}

impl FloatGate {
    pub const fn new(epsilon: f32) -> Self {
        Self {
            last: None,
            epsilon,
        }
    }

    pub fn update(&mut self, value: f32) -> bool {
        match self.last {
            Some(last) if (last - value).abs() <= self.epsilon => false,
            _ => {
                self.last = Some(value);
                true
            }
        }
    }

    pub fn last(&self) -> Option<f32> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_gate_skips_repeats() {
        let mut gate = ChangeGate::new();
        assert!(gate.update(&Some("intro")));
        assert!(!gate.update(&Some("intro")));
        assert!(gate.update(&None));
    }

    #[test]
    fn float_gate_ignores_jitter() {
        let mut gate = FloatGate::new(0.01);
        assert!(gate.update(0.5));
        assert!(!gate.update(0.505));
        assert!(gate.update(0.52));
        assert_eq!(gate.last(), Some(0.52));
    }
}
