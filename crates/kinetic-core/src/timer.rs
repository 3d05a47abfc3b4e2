//! Fire-or-cancel timers owned by the component that arms them.
//!
//! Timers are polled with the current instant instead of scheduling host
//! callbacks, so a component can check them from its own input handlers or
//! frame step without any global timer registry.

use web_time::{Duration, Instant};

/// One-shot deadline. Never retried: once it fires it stays disarmed until
/// armed again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arms (or re-arms) the timer to fire `delay` after `now`.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` exactly once when `now` has reached the deadline.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Tracks whether some input happened within a trailing window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivityWindow {
    last_activity: Option<Instant>,
    window: Duration,
}

impl ActivityWindow {
    pub const fn new(window: Duration) -> Self {
        Self {
            last_activity: None,
            window,
        }
    }

    pub fn record(&mut self, now: Instant) {
        self.last_activity = Some(now);
    }

    pub fn clear(&mut self) {
        self.last_activity = None;
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn last_activity(&self) -> Option<Instant> {
        self.last_activity
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.last_activity
            .is_some_and(|last| now.saturating_duration_since(last) < self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_fires_once_after_deadline() {
        let t0 = Instant::now();
        let mut timer = Timer::new();
        timer.arm(t0, Duration::from_millis(150));

        assert!(!timer.fire_if_due(t0 + Duration::from_millis(149)));
        assert!(timer.fire_if_due(t0 + Duration::from_millis(150)));
        assert!(!timer.fire_if_due(t0 + Duration::from_millis(400)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn rearming_pushes_deadline_back() {
        let t0 = Instant::now();
        let mut timer = Timer::new();
        timer.arm(t0, Duration::from_millis(150));
        timer.arm(t0 + Duration::from_millis(100), Duration::from_millis(150));

        assert!(!timer.fire_if_due(t0 + Duration::from_millis(200)));
        assert!(timer.fire_if_due(t0 + Duration::from_millis(250)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let t0 = Instant::now();
        let mut timer = Timer::new();
        timer.arm(t0, Duration::from_millis(10));
        timer.cancel();
        assert!(!timer.fire_if_due(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn activity_window_expires() {
        let t0 = Instant::now();
        let mut activity = ActivityWindow::new(Duration::from_millis(2000));
        assert!(!activity.is_active(t0));

        activity.record(t0);
        assert!(activity.is_active(t0 + Duration::from_millis(1999)));
        assert!(!activity.is_active(t0 + Duration::from_millis(2000)));
    }
}
