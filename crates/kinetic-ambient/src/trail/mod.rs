//! Compositing cursor trail.
//!
//! Every frame is drawn in two passes over one surface: live ripples are
//! painted as additive glowing discs, then slightly smaller discs are erased
//! from their centres so each ripple reads as a ring. Overlapping trail
//! ripples brighten without ever filling into a solid blob.

mod ripple;

pub use ripple::{Ripple, RippleSample};

use std::collections::VecDeque;

use kinetic_core::FrameComponent;
use kinetic_graphics::{BlendMode, Brush, Color, DisplayList, DrawingSurface, Point, Shadow, Size};
use web_time::Instant;

use crate::config::TrailConfig;

pub struct PointerTrail {
    config: TrailConfig,
    surface: Box<dyn DrawingSurface>,
    trail: VecDeque<Ripple>,
    clicks: VecDeque<Ripple>,
    last_point: Option<Point>,
    /// Travel since the last emitted trail ripple.
    carried: f32,
    color: Color,
    size: Size,
    frame_time: Option<Instant>,
    list: DisplayList,
}

impl PointerTrail {
    pub fn new(surface: impl DrawingSurface + 'static, config: TrailConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("invalid trail config ({err}); using defaults");
                TrailConfig::default()
            }
        };
        Self {
            surface: Box::new(surface),
            trail: VecDeque::new(),
            clicks: VecDeque::new(),
            last_point: None,
            carried: 0.0,
            color: config.color,
            size: Size::ZERO,
            frame_time: None,
            list: DisplayList::default(),
            config,
        }
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn trail_ripples(&self) -> impl Iterator<Item = &Ripple> {
        self.trail.iter()
    }

    pub fn click_ripples(&self) -> impl Iterator<Item = &Ripple> {
        self.clicks.iter()
    }

    /// Ripples of both kinds still held in memory.
    pub fn live_count(&self) -> usize {
        self.trail.len() + self.clicks.len()
    }

    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Emits one trail ripple per `spacing` pixels travelled since the last
    /// one, spread evenly along the segment and capped per event.
    pub fn on_pointer_move(&mut self, position: Point, time: Instant) {
        if !position.is_finite() {
            return;
        }
        let Some(last) = self.last_point.replace(position) else {
            self.push_trail(position, time);
            return;
        };
        let travelled = self.carried + last.distance_to(position);
        let due = (travelled / self.config.spacing).floor();
        self.carried = travelled - due * self.config.spacing;
        let count = (due as usize).min(self.config.max_ripples_per_event);
        for step in 1..=count {
            let fraction = step as f32 / count as f32;
            self.push_trail(last + (position - last) * fraction, time);
        }
    }

    /// The pointer left the surface; the next move starts a fresh segment.
    pub fn on_pointer_leave(&mut self) {
        self.last_point = None;
        self.carried = 0.0;
    }

    pub fn on_primary_press(&mut self, position: Point, time: Instant) {
        if !position.is_finite() {
            return;
        }
        self.clicks
            .push_back(Ripple::new(position, time, self.config.click, self.config.expand_phase));
    }

    /// Drops every ripple whose lifespan has elapsed at `now`.
    pub fn prune(&mut self, now: Instant) {
        self.trail.retain(|ripple| !ripple.is_expired(now));
        self.clicks.retain(|ripple| !ripple.is_expired(now));
    }

    fn push_trail(&mut self, position: Point, time: Instant) {
        self.trail
            .push_back(Ripple::new(position, time, self.config.trail, self.config.expand_phase));
    }
}

impl FrameComponent for PointerTrail {
    fn measure(&mut self, _frame_time: Instant) -> bool {
        let size = self.surface.size();
        if size.is_empty() {
            log::trace!("pointer trail skipped: surface has no size");
            return false;
        }
        self.size = size;
        true
    }

    fn integrate(&mut self, frame_time: Instant) {
        self.prune(frame_time);
        self.frame_time = Some(frame_time);
    }

    fn publish(&mut self) {
        self.list.reset(self.size);
        let Some(now) = self.frame_time else {
            self.surface.paint(&self.list);
            return;
        };
        let samples: Vec<(Point, RippleSample)> = self
            .trail
            .iter()
            .chain(self.clicks.iter())
            .filter_map(|ripple| ripple.sample(now).map(|sample| (ripple.origin(), sample)))
            .collect();

        for (origin, sample) in &samples {
            let color = self.color.with_alpha(self.color.a() * sample.alpha);
            self.list.fill_circle_with(
                *origin,
                sample.radius,
                Brush::solid(color),
                BlendMode::Lighter,
                Some(Shadow {
                    blur: self.config.glow_blur,
                    color,
                }),
            );
        }
        for (origin, sample) in &samples {
            self.list.fill_circle_with(
                *origin,
                sample.radius * self.config.hole_ratio,
                Brush::solid(Color::BLACK),
                BlendMode::DestinationOut,
                None,
            );
        }
        self.surface.paint(&self.list);
    }
}
