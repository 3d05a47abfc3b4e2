use kinetic_animation::ease_out_cubic;
use kinetic_graphics::Point;
use web_time::{Duration, Instant};

use crate::config::RippleStyle;

/// Radius and opacity of a ripple at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleSample {
    pub radius: f32,
    pub alpha: f32,
}

/// A trail or click pulse. Immutable once emitted; its look is a pure
/// function of elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    origin: Point,
    started_at: Instant,
    base_radius: f32,
    max_radius: f32,
    lifespan: Duration,
    /// Share of the lifespan spent expanding.
    expand_phase: f32,
}

impl Ripple {
    pub fn new(origin: Point, started_at: Instant, style: RippleStyle, expand_phase: f32) -> Self {
        Self {
            origin,
            started_at,
            base_radius: style.base_radius,
            max_radius: style.max_radius,
            lifespan: style.lifespan(),
            expand_phase: expand_phase.clamp(f32::EPSILON, 1.0 - f32::EPSILON),
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn lifespan(&self) -> Duration {
        self.lifespan
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.lifespan
    }

    /// Envelope at `now`, or `None` once the lifespan has elapsed.
    ///
    /// Expansion from base to max radius eases out over the first phase;
    /// afterwards the radius shrinks linearly back toward base while the
    /// opacity fades out on an ease-out curve.
    pub fn sample(&self, now: Instant) -> Option<RippleSample> {
        if self.is_expired(now) {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.started_at).as_secs_f32();
        let fraction = elapsed / self.lifespan.as_secs_f32();
        let span = self.max_radius - self.base_radius;
        if fraction < self.expand_phase {
            let expand = ease_out_cubic(fraction / self.expand_phase);
            Some(RippleSample {
                radius: self.base_radius + span * expand,
                alpha: 1.0,
            })
        } else {
            let shrink = (fraction - self.expand_phase) / (1.0 - self.expand_phase);
            Some(RippleSample {
                radius: self.max_radius - span * shrink,
                alpha: 1.0 - ease_out_cubic(shrink),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ripple(start: Instant) -> Ripple {
        Ripple::new(Point::ZERO, start, RippleStyle::new(2.0, 14.0, 600), 0.2)
    }

    #[test]
    fn envelope_peaks_at_end_of_expansion() {
        let start = Instant::now();
        let ripple = ripple(start);

        let born = ripple.sample(start).map(|sample| sample.radius);
        assert_eq!(born, Some(2.0));

        let peak = ripple
            .sample(start + Duration::from_millis(120))
            .map(|sample| sample.radius)
            .unwrap_or_default();
        assert!((peak - 14.0).abs() < 1e-3, "peak {peak}");

        let late = ripple
            .sample(start + Duration::from_millis(540))
            .unwrap_or(RippleSample {
                radius: 0.0,
                alpha: 1.0,
            });
        assert!(late.radius < peak);
        assert!(late.alpha < 0.05);
    }

    #[test]
    fn expansion_is_fast_at_first() {
        let start = Instant::now();
        let ripple = ripple(start);
        let radius = |millis| {
            ripple
                .sample(start + Duration::from_millis(millis))
                .map_or(0.0, |sample| sample.radius)
        };
        assert!(radius(30) - radius(0) > radius(120) - radius(90));
    }

    #[test]
    fn gone_at_lifespan() {
        let start = Instant::now();
        let ripple = ripple(start);
        assert!(ripple.sample(start + Duration::from_millis(599)).is_some());
        assert!(ripple.sample(start + Duration::from_millis(600)).is_none());
        assert!(ripple.is_expired(start + Duration::from_millis(600)));
    }
}
