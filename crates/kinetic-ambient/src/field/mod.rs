//! Wandering glow spots with pointer repulsion and click shockwaves.

mod spot;

pub use spot::Spot;

use kinetic_animation::approach;
use kinetic_core::{ActivityWindow, FrameComponent};
use kinetic_foundation::{DeviceBreakpoints, DeviceClass};
use kinetic_graphics::{Brush, Color, DisplayList, DrawingSurface, Hsla, Point, Size};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use web_time::Instant;

use crate::color::ColorFollower;
use crate::config::FieldConfig;

/// Spots start white until the host provides an accent.
const INITIAL_LIGHTNESS: f32 = 1.0;

/// The ambient canvas simulation.
///
/// Spots drift toward a sinusoidal wander target, get pushed away from a
/// recently active pointer and by decaying click shockwaves, and are painted
/// as radial glows in a colour that converges on the host accent.
pub struct AmbientField {
    config: FieldConfig,
    breakpoints: DeviceBreakpoints,
    surface: Box<dyn DrawingSurface>,
    rng: StdRng,
    device: DeviceClass,
    size: Size,
    spots: Vec<Spot>,
    regenerate_requested: bool,
    /// Simulation time, advanced by a fixed step every frame.
    time: f32,
    color: ColorFollower,
    pointer: Option<Point>,
    pointer_activity: ActivityWindow,
    shockwave: f32,
    shockwave_origin: Point,
    list: DisplayList,
}

impl AmbientField {
    pub fn new(
        surface: impl DrawingSurface + 'static,
        config: FieldConfig,
        breakpoints: DeviceBreakpoints,
    ) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("invalid field config ({err}); using defaults");
                FieldConfig::default()
            }
        };
        Self {
            breakpoints,
            surface: Box::new(surface),
            rng: StdRng::from_entropy(),
            device: DeviceClass::default(),
            size: Size::ZERO,
            spots: Vec::new(),
            regenerate_requested: true,
            time: 0.0,
            color: ColorFollower::new(
                Hsla::new(0.0, 0.0, INITIAL_LIGHTNESS, config.spot_alpha),
                config.color_convergence,
            ),
            pointer: None,
            pointer_activity: ActivityWindow::new(config.pointer_activity()),
            shockwave: 0.0,
            shockwave_origin: Point::ZERO,
            list: DisplayList::default(),
            config,
        }
    }

    /// Makes spot placement reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.regenerate_requested = true;
        self
    }

    /// Starts from `accent` instead of converging toward it from white.
    pub fn with_accent(mut self, accent: Color) -> Self {
        let hsla = accent.to_hsla().with_alpha(self.config.spot_alpha);
        self.color = ColorFollower::new(hsla, self.config.color_convergence);
        self
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn device_class(&self) -> DeviceClass {
        self.device
    }

    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn shockwave(&self) -> f32 {
        self.shockwave
    }

    pub fn color(&self) -> Hsla {
        self.color.current()
    }

    /// The commands painted on the last published frame.
    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    /// Replaces every spot on the next frame, e.g. when the page switches
    /// to another project.
    pub fn regenerate(&mut self) {
        self.regenerate_requested = true;
    }

    pub fn set_breakpoints(&mut self, breakpoints: DeviceBreakpoints) {
        self.breakpoints = breakpoints;
    }

    /// The host accent changed; spots drift to it over the next frames.
    pub fn set_accent(&mut self, accent: Color) {
        self.color.set_accent(accent, self.config.spot_alpha);
    }

    pub fn on_pointer_move(&mut self, position: Point, time: Instant) {
        if !position.is_finite() {
            return;
        }
        self.pointer = Some(position);
        self.pointer_activity.record(time);
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
        self.pointer_activity.clear();
    }

    /// A primary click or tap sends a shockwave out from `position`.
    pub fn on_primary_press(&mut self, position: Point, time: Instant) {
        if !position.is_finite() {
            return;
        }
        log::trace!("shockwave at ({}, {})", position.x, position.y);
        self.shockwave = self.config.shockwave_magnitude;
        self.shockwave_origin = position;
        self.pointer = Some(position);
        self.pointer_activity.record(time);
    }

    fn regenerate_spots(&mut self) {
        let range = self.config.spot_counts(self.device);
        let count = self.rng.gen_range(range.min..=range.max);
        self.spots = spot::place_spots(&mut self.rng, count, self.size, &self.config);
        self.regenerate_requested = false;
        log::debug!(
            "ambient field regenerated: {} spots for {:?} at {}x{}",
            count,
            self.device,
            self.size.width,
            self.size.height
        );
    }

    fn repulsion(&self, position: Point, pointer: Point) -> Point {
        let away = position - pointer;
        let distance = away.length();
        if distance >= self.config.repulsion_radius {
            return Point::ZERO;
        }
        let Some(direction) = away.normalized() else {
            return Point::ZERO;
        };
        direction * (self.config.repulsion_strength / distance.max(1.0))
    }

    fn shockwave_push(&self, position: Point) -> Point {
        let away = position - self.shockwave_origin;
        let Some(direction) = away.normalized() else {
            return Point::ZERO;
        };
        let falloff = away.length() / self.config.shockwave_falloff;
        direction * (self.shockwave / (1.0 + falloff * falloff))
    }
}

impl FrameComponent for AmbientField {
    fn measure(&mut self, _frame_time: Instant) -> bool {
        let size = self.surface.size();
        if size.is_empty() {
            log::trace!("ambient field skipped: surface has no size");
            return false;
        }
        let device = DeviceClass::classify(size, &self.breakpoints);
        self.size = size;
        if device != self.device {
            log::debug!("ambient field device class {:?} -> {:?}", self.device, device);
            self.device = device;
            self.regenerate_requested = true;
        }
        if self.regenerate_requested || self.spots.is_empty() {
            self.regenerate_spots();
        }
        true
    }

    fn integrate(&mut self, frame_time: Instant) {
        self.time += self.config.time_step;

        let pointer = self
            .pointer
            .filter(|_| self.config.repulsion_enabled(self.device))
            .filter(|_| self.pointer_activity.is_active(frame_time));
        let shockwave_live = self.shockwave > self.config.shockwave_cutoff;

        for index in 0..self.spots.len() {
            let spot = self.spots[index];
            let mut target =
                spot.wander_target(self.time, self.size, self.config.wander_amplitude);
            if let Some(pointer) = pointer {
                target += self.repulsion(spot.position, pointer);
            }
            if shockwave_live {
                target += self.shockwave_push(spot.position);
            }
            self.spots[index].position = approach(&spot.position, &target, self.config.follow_rate);
        }

        if shockwave_live {
            self.shockwave *= self.config.shockwave_decay;
        }
        if self.shockwave <= self.config.shockwave_cutoff {
            self.shockwave = 0.0;
        }
        self.color.step();
    }

    fn publish(&mut self) {
        self.list.reset(self.size);
        let color = self.color.current().to_color();
        for spot in &self.spots {
            let radius = spot.radius_at(self.time, self.config.pulse, self.config.pulse_speed);
            self.list
                .fill_circle(spot.position, radius, Brush::glow(color, spot.position, radius));
        }
        self.surface.paint(&self.list);
    }
}
