use kinetic_core::{ensure_positive, ensure_range, ConfigError};
use kinetic_foundation::gesture_constants::POINTER_ACTIVITY_WINDOW;
use kinetic_foundation::DeviceClass;
use kinetic_graphics::Color;
use web_time::Duration;

/// Inclusive range of spot counts for one device class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min == 0 || self.min > self.max {
            return Err(ConfigError::Inverted {
                field,
                min: self.min as f32,
                max: self.max as f32,
            });
        }
        Ok(())
    }
}

/// Tunables of the ambient glow field.
///
/// Rates and factors are per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldConfig {
    pub mobile_spots: CountRange,
    pub tablet_spots: CountRange,
    pub desktop_spots: CountRange,
    /// Base radius range as a fraction of the smaller viewport dimension.
    pub min_radius_fraction: f32,
    pub max_radius_fraction: f32,
    /// Two spots may overlap by at most this fraction of their combined radii.
    pub overlap_tolerance: f32,
    pub placement_attempts: u32,
    /// Simulation time added every frame.
    pub time_step: f32,
    /// Wander reach as a fraction of the viewport half extents.
    pub wander_amplitude: f32,
    pub min_wander_speed: f32,
    pub max_wander_speed: f32,
    /// Fraction of the gap to the combined target a spot covers per frame.
    pub follow_rate: f32,
    /// Radius oscillates by this fraction of the base radius.
    pub pulse: f32,
    pub pulse_speed: f32,
    pub repulsion_radius: f32,
    pub repulsion_strength: f32,
    /// Repulsion normally runs on desktop only.
    pub repulsion_on_touch_devices: bool,
    pub pointer_activity_millis: u64,
    pub shockwave_magnitude: f32,
    pub shockwave_decay: f32,
    /// Shockwaves weaker than this are dropped.
    pub shockwave_cutoff: f32,
    /// Distance at which the shockwave push has halved.
    pub shockwave_falloff: f32,
    pub color_convergence: f32,
    pub spot_alpha: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            mobile_spots: CountRange::new(3, 4),
            tablet_spots: CountRange::new(4, 6),
            desktop_spots: CountRange::new(6, 8),
            min_radius_fraction: 0.18,
            max_radius_fraction: 0.32,
            overlap_tolerance: 0.35,
            placement_attempts: 60,
            time_step: 0.004,
            wander_amplitude: 0.35,
            min_wander_speed: 0.6,
            max_wander_speed: 1.4,
            follow_rate: 0.02,
            pulse: 0.15,
            pulse_speed: 2.0,
            repulsion_radius: 320.0,
            repulsion_strength: 24_000.0,
            repulsion_on_touch_devices: false,
            pointer_activity_millis: POINTER_ACTIVITY_WINDOW.as_millis() as u64,
            shockwave_magnitude: 3000.0,
            shockwave_decay: 0.9,
            shockwave_cutoff: 1.0,
            shockwave_falloff: 250.0,
            color_convergence: 0.02,
            spot_alpha: 0.35,
        }
    }
}

impl FieldConfig {
    pub fn with_spot_counts(mut self, device: DeviceClass, range: CountRange) -> Self {
        match device {
            DeviceClass::Mobile => self.mobile_spots = range,
            DeviceClass::Tablet => self.tablet_spots = range,
            DeviceClass::Desktop => self.desktop_spots = range,
        }
        self
    }

    pub fn with_repulsion(mut self, radius: f32, strength: f32) -> Self {
        self.repulsion_radius = radius;
        self.repulsion_strength = strength;
        self
    }

    pub fn with_shockwave(mut self, magnitude: f32, decay: f32) -> Self {
        self.shockwave_magnitude = magnitude;
        self.shockwave_decay = decay;
        self
    }

    pub fn spot_counts(&self, device: DeviceClass) -> CountRange {
        match device {
            DeviceClass::Mobile => self.mobile_spots,
            DeviceClass::Tablet => self.tablet_spots,
            DeviceClass::Desktop => self.desktop_spots,
        }
    }

    pub fn repulsion_enabled(&self, device: DeviceClass) -> bool {
        self.repulsion_on_touch_devices || !device.is_touch_primary()
    }

    pub fn pointer_activity(&self) -> Duration {
        Duration::from_millis(self.pointer_activity_millis)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mobile_spots.validate("field.mobile_spots")?;
        self.tablet_spots.validate("field.tablet_spots")?;
        self.desktop_spots.validate("field.desktop_spots")?;
        ensure_range("field.min_radius_fraction", self.min_radius_fraction, 0.01, 1.0)?;
        ensure_range(
            "field.max_radius_fraction",
            self.max_radius_fraction,
            self.min_radius_fraction,
            1.0,
        )?;
        ensure_range("field.overlap_tolerance", self.overlap_tolerance, 0.0, 1.0)?;
        ensure_positive("field.time_step", self.time_step)?;
        ensure_range("field.wander_amplitude", self.wander_amplitude, 0.0, 1.0)?;
        ensure_positive("field.min_wander_speed", self.min_wander_speed)?;
        ensure_range(
            "field.max_wander_speed",
            self.max_wander_speed,
            self.min_wander_speed,
            f32::MAX,
        )?;
        ensure_range("field.follow_rate", self.follow_rate, 0.001, 1.0)?;
        ensure_range("field.pulse", self.pulse, 0.0, 0.9)?;
        ensure_positive("field.repulsion_radius", self.repulsion_radius)?;
        ensure_range("field.repulsion_strength", self.repulsion_strength, 0.0, f32::MAX)?;
        ensure_range("field.shockwave_magnitude", self.shockwave_magnitude, 0.0, f32::MAX)?;
        ensure_range("field.shockwave_decay", self.shockwave_decay, 0.0, 0.999)?;
        ensure_positive("field.shockwave_cutoff", self.shockwave_cutoff)?;
        ensure_positive("field.shockwave_falloff", self.shockwave_falloff)?;
        ensure_range("field.color_convergence", self.color_convergence, 0.001, 1.0)?;
        ensure_range("field.spot_alpha", self.spot_alpha, 0.0, 1.0)
    }
}

/// Size and duration of one kind of ripple.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RippleStyle {
    pub base_radius: f32,
    pub max_radius: f32,
    pub lifespan_millis: u64,
}

impl RippleStyle {
    pub const fn new(base_radius: f32, max_radius: f32, lifespan_millis: u64) -> Self {
        Self {
            base_radius,
            max_radius,
            lifespan_millis,
        }
    }

    pub fn lifespan(&self) -> Duration {
        Duration::from_millis(self.lifespan_millis)
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        ensure_positive(field, self.base_radius)?;
        ensure_range(field, self.max_radius, self.base_radius, f32::MAX)?;
        ensure_positive(field, self.lifespan_millis as f32)
    }
}

/// Tunables of the pointer trail.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrailConfig {
    /// Pointer travel between two trail ripples, in pixels.
    pub spacing: f32,
    pub max_ripples_per_event: usize,
    pub trail: RippleStyle,
    pub click: RippleStyle,
    /// Share of a ripple's life spent expanding.
    pub expand_phase: f32,
    /// Radius of the punched hole relative to the ripple.
    pub hole_ratio: f32,
    pub glow_blur: f32,
    pub color: Color,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            spacing: 2.0,
            max_ripples_per_event: 24,
            trail: RippleStyle::new(2.0, 14.0, 600),
            click: RippleStyle::new(10.0, 120.0, 900),
            expand_phase: 0.2,
            hole_ratio: 0.6,
            glow_blur: 12.0,
            color: Color::rgba(1.0, 1.0, 1.0, 0.6),
        }
    }
}

impl TrailConfig {
    pub fn with_trail_style(mut self, style: RippleStyle) -> Self {
        self.trail = style;
        self
    }

    pub fn with_click_style(mut self, style: RippleStyle) -> Self {
        self.click = style;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("trail.spacing", self.spacing)?;
        ensure_positive("trail.max_ripples_per_event", self.max_ripples_per_event as f32)?;
        self.trail.validate("trail.trail")?;
        self.click.validate("trail.click")?;
        ensure_range("trail.expand_phase", self.expand_phase, 0.01, 0.99)?;
        ensure_range("trail.hole_ratio", self.hole_ratio, 0.0, 1.0)?;
        ensure_range("trail.glow_blur", self.glow_blur, 0.0, f32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(FieldConfig::default().validate().is_ok());
        assert!(TrailConfig::default().validate().is_ok());
    }

    #[test]
    fn spot_counts_follow_device_class() {
        let config = FieldConfig::default();
        assert_eq!(config.spot_counts(DeviceClass::Mobile), CountRange::new(3, 4));
        assert_eq!(config.spot_counts(DeviceClass::Tablet), CountRange::new(4, 6));
        assert_eq!(config.spot_counts(DeviceClass::Desktop), CountRange::new(6, 8));
    }

    #[test]
    fn repulsion_is_desktop_only_by_default() {
        let config = FieldConfig::default();
        assert!(config.repulsion_enabled(DeviceClass::Desktop));
        assert!(!config.repulsion_enabled(DeviceClass::Mobile));
        assert!(!config.repulsion_enabled(DeviceClass::Tablet));
    }

    #[test]
    fn empty_count_range_rejected() {
        let config =
            FieldConfig::default().with_spot_counts(DeviceClass::Tablet, CountRange::new(5, 2));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Inverted {
                field: "field.tablet_spots",
                ..
            })
        ));
    }

    #[test]
    fn ripple_shrinking_below_base_rejected() {
        let config = TrailConfig::default().with_click_style(RippleStyle::new(20.0, 10.0, 900));
        assert!(config.validate().is_err());
    }
}
