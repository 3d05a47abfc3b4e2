use std::f32::consts::TAU;

use kinetic_graphics::{Point, Size};
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::FieldConfig;

/// One glow blob of the ambient field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spot {
    pub(crate) position: Point,
    /// Phase offsets of the x and y wander sinusoids.
    pub(crate) wander_phase: Point,
    pub(crate) wander_speed: Point,
    pub(crate) base_radius: f32,
    /// Placed without the overlap check after the attempt budget ran out.
    pub(crate) fallback: bool,
}

impl Spot {
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn wander_phase(&self) -> Point {
        self.wander_phase
    }

    pub fn wander_speed(&self) -> Point {
        self.wander_speed
    }

    pub fn base_radius(&self) -> f32 {
        self.base_radius
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Where the spot's own wandering wants it at simulation time `time`.
    pub fn wander_target(&self, time: f32, viewport: Size, amplitude: f32) -> Point {
        let center = viewport.center();
        Point::new(
            center.x
                + (time * self.wander_speed.x + self.wander_phase.x).sin()
                    * amplitude
                    * viewport.width
                    * 0.5,
            center.y
                + (time * self.wander_speed.y + self.wander_phase.y).cos()
                    * amplitude
                    * viewport.height
                    * 0.5,
        )
    }

    /// Base radius modulated by a bounded sinusoid of `pulse` relative depth.
    pub fn radius_at(&self, time: f32, pulse: f32, pulse_speed: f32) -> f32 {
        self.base_radius * (1.0 + pulse * (time * pulse_speed + self.wander_phase.x).sin())
    }

    fn overlaps(&self, other: &Spot, tolerance: f32) -> bool {
        let min_distance = (1.0 - tolerance) * (self.base_radius + other.base_radius);
        self.position.distance_to(other.position) < min_distance
    }
}

/// Rejection-samples `count` spots over `viewport`.
///
/// Each candidate gets a fresh radius and position per attempt. When the
/// attempt budget runs out the last candidate is kept anyway, so the field
/// always reaches `count`.
pub(crate) fn place_spots(
    rng: &mut StdRng,
    count: usize,
    viewport: Size,
    config: &FieldConfig,
) -> Vec<Spot> {
    let mut spots: Vec<Spot> = Vec::with_capacity(count);
    let min_dimension = viewport.min_dimension();
    let attempts = config.placement_attempts.max(1);

    for index in 0..count {
        let mut candidate = random_spot(rng, viewport, min_dimension, config);
        let mut placed = false;
        for _ in 0..attempts {
            if !spots
                .iter()
                .any(|spot| spot.overlaps(&candidate, config.overlap_tolerance))
            {
                placed = true;
                break;
            }
            candidate = random_spot(rng, viewport, min_dimension, config);
        }
        if !placed {
            log::debug!("spot {index} placed without overlap check after {attempts} attempts");
            candidate.fallback = true;
        }
        spots.push(candidate);
    }
    spots
}

fn random_spot(
    rng: &mut StdRng,
    viewport: Size,
    min_dimension: f32,
    config: &FieldConfig,
) -> Spot {
    let radius_fraction = if config.max_radius_fraction > config.min_radius_fraction {
        rng.gen_range(config.min_radius_fraction..config.max_radius_fraction)
    } else {
        config.min_radius_fraction
    };
    let speed = |rng: &mut StdRng| {
        if config.max_wander_speed > config.min_wander_speed {
            rng.gen_range(config.min_wander_speed..config.max_wander_speed)
        } else {
            config.min_wander_speed
        }
    };
    Spot {
        position: Point::new(
            rng.gen_range(0.0..=viewport.width),
            rng.gen_range(0.0..=viewport.height),
        ),
        wander_phase: Point::new(rng.gen_range(0.0..TAU), rng.gen_range(0.0..TAU)),
        wander_speed: Point::new(speed(rng), speed(rng)),
        base_radius: min_dimension * radius_fraction,
        fallback: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn fills_requested_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let spots = place_spots(&mut rng, 8, Size::new(1920.0, 1080.0), &FieldConfig::default());
        assert_eq!(spots.len(), 8);
        for spot in &spots {
            assert!(spot.position.x >= 0.0 && spot.position.x <= 1920.0);
            assert!(spot.position.y >= 0.0 && spot.position.y <= 1080.0);
            assert!(spot.base_radius >= 1080.0 * 0.18 && spot.base_radius <= 1080.0 * 0.32);
        }
    }

    #[test]
    fn crowded_viewport_falls_back() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = FieldConfig {
            placement_attempts: 3,
            ..FieldConfig::default()
        };
        // Forty large spots cannot keep their distance on a small square.
        let spots = place_spots(&mut rng, 40, Size::new(100.0, 100.0), &config);
        assert_eq!(spots.len(), 40);
        assert!(spots.iter().any(Spot::is_fallback));
    }

    #[test]
    fn pulse_stays_within_bounds() {
        let spot = Spot {
            position: Point::ZERO,
            wander_phase: Point::new(0.3, 1.1),
            wander_speed: Point::new(1.0, 1.0),
            base_radius: 100.0,
            fallback: false,
        };
        for step in 0..1000 {
            let radius = spot.radius_at(step as f32 * 0.01, 0.15, 2.0);
            assert!((85.0 - 1e-3..=115.0 + 1e-3).contains(&radius));
        }
    }
}
