use web_time::{Duration, Instant};

use crate::easing::{Easing, Lerp};

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    /// Add a delay before the animation starts.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_millis)
    }

    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(self.delay_millis + self.duration_millis)
    }

    /// Eased progress `elapsed` into the animation.
    pub fn fraction_at(&self, elapsed: Duration) -> f32 {
        let delay = Duration::from_millis(self.delay_millis);
        let Some(running) = elapsed.checked_sub(delay) else {
            return 0.0;
        };
        if self.duration_millis == 0 {
            return 1.0;
        }
        let linear = running.as_secs_f32() / self.duration().as_secs_f32();
        self.easing.transform(linear.min(1.0))
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}

/// A bounded one-shot move from `from` to `to`, sampled by wall time.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<T> {
    from: T,
    to: T,
    spec: AnimationSpec,
    started_at: Instant,
}

impl<T: Lerp + Clone> Transition<T> {
    pub fn new(from: T, to: T, spec: AnimationSpec, started_at: Instant) -> Self {
        Self {
            from,
            to,
            spec,
            started_at,
        }
    }

    pub fn target(&self) -> &T {
        &self.to
    }

    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    pub fn value_at(&self, now: Instant) -> T {
        let elapsed = now.saturating_duration_since(self.started_at);
        if self.is_finished(now) {
            return self.to.clone();
        }
        self.from.lerp(&self.to, self.spec.fraction_at(elapsed))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.spec.total_duration()
    }
}
