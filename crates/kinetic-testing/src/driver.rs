use kinetic_core::FrameClock;
use web_time::{Duration, Instant};

/// Nominal 60 Hz frame interval.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Drives a [`FrameClock`] on a synthetic timeline.
///
/// Time only moves when the driver is told to, so tests can place input
/// events and timer deadlines exactly.
pub struct FrameDriver {
    clock: FrameClock,
    now: Instant,
    step: Duration,
    frames: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::with_clock(FrameClock::new())
    }

    pub fn with_clock(clock: FrameClock) -> Self {
        Self {
            clock,
            now: Instant::now(),
            step: FRAME_INTERVAL,
            frames: 0,
        }
    }

    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    pub fn clock(&self) -> FrameClock {
        self.clock.clone()
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Frames driven so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Moves time forward without running a frame.
    pub fn advance(&mut self, by: Duration) -> Instant {
        self.now += by;
        self.now
    }

    /// Advances one step and drains the clock.
    pub fn frame(&mut self) -> Instant {
        self.now += self.step;
        self.frames += 1;
        self.clock.drain_frame_callbacks(self.now);
        self.now
    }

    pub fn frames(&mut self, count: usize) -> Instant {
        for _ in 0..count {
            self.frame();
        }
        self.now
    }

    /// Runs frames until `done` holds, up to `max_frames`. Returns whether
    /// the condition was met.
    pub fn run_until(&mut self, max_frames: usize, mut done: impl FnMut() -> bool) -> bool {
        for _ in 0..max_frames {
            if done() {
                return true;
            }
            self.frame();
        }
        done()
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn frames_advance_time_by_step() {
        let mut driver = FrameDriver::new();
        let start = driver.now();
        let seen = Rc::new(Cell::new(None));
        let slot = Rc::clone(&seen);
        let _registration = driver.clock().with_frame(move |time| slot.set(Some(time)));

        let time = driver.frame();

        assert_eq!(time, start + FRAME_INTERVAL);
        assert_eq!(seen.get(), Some(time));
        assert_eq!(driver.frame_count(), 1);
    }

    #[test]
    fn run_until_stops_when_condition_holds() {
        let mut driver = FrameDriver::new();
        let mut polls = 0;
        assert!(driver.run_until(10, || {
            polls += 1;
            polls == 3
        }));
        assert_eq!(driver.frame_count(), 2);
    }
}
