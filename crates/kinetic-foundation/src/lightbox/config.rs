use kinetic_animation::{AnimationSpec, Easing};
use kinetic_core::{ensure_ordered, ensure_positive, ensure_range, ConfigError};
use web_time::Duration;

use crate::device::DeviceClass;
use crate::gesture_constants::{DOUBLE_TAP_WINDOW, DRAG_HOLD_DELAY, TAP_SLOP, WHEEL_SETTLE_DELAY};

/// Nominal zoom range of the viewer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomBounds {
    pub min: f32,
    pub max: f32,
}

impl ZoomBounds {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, scale: f32) -> f32 {
        scale.clamp(self.min, self.max)
    }

    pub fn contains(&self, scale: f32) -> bool {
        (self.min..=self.max).contains(&scale)
    }

    pub fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        ensure_positive(field, self.min)?;
        ensure_ordered(field, self.min, self.max)
    }
}

/// Tunables of the lightbox gesture recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LightboxConfig {
    pub desktop_zoom: ZoomBounds,
    pub tablet_zoom: ZoomBounds,
    pub mobile_zoom: ZoomBounds,
    /// Ending a pinch below this scale closes the viewer.
    pub close_threshold: f32,
    /// Share of the raw pinch scale kept beyond the zoom ceiling.
    pub pinch_resistance: f32,
    /// Wheel zoom may leave the nominal range by this fraction of a bound.
    pub wheel_overshoot: f32,
    /// Scale factor per wheel pixel, applied exponentially.
    pub wheel_zoom_gain: f32,
    pub hold_delay_millis: u64,
    pub wheel_settle_delay_millis: u64,
    pub double_tap_window_millis: u64,
    pub tap_slop: f32,
    /// Transition the host eases settle corrections with.
    pub settle: AnimationSpec,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            desktop_zoom: ZoomBounds::new(1.0, 3.0),
            tablet_zoom: ZoomBounds::new(1.0, 1.5),
            mobile_zoom: ZoomBounds::new(1.0, 1.5),
            close_threshold: 0.75,
            pinch_resistance: 0.3,
            wheel_overshoot: 0.25,
            wheel_zoom_gain: 0.0015,
            hold_delay_millis: DRAG_HOLD_DELAY.as_millis() as u64,
            wheel_settle_delay_millis: WHEEL_SETTLE_DELAY.as_millis() as u64,
            double_tap_window_millis: DOUBLE_TAP_WINDOW.as_millis() as u64,
            tap_slop: TAP_SLOP,
            settle: AnimationSpec::tween(300, Easing::EaseOut),
        }
    }
}

impl LightboxConfig {
    pub fn zoom_bounds(&self, device: DeviceClass) -> ZoomBounds {
        match device {
            DeviceClass::Mobile => self.mobile_zoom,
            DeviceClass::Tablet => self.tablet_zoom,
            DeviceClass::Desktop => self.desktop_zoom,
        }
    }

    pub fn with_zoom_bounds(mut self, device: DeviceClass, bounds: ZoomBounds) -> Self {
        match device {
            DeviceClass::Mobile => self.mobile_zoom = bounds,
            DeviceClass::Tablet => self.tablet_zoom = bounds,
            DeviceClass::Desktop => self.desktop_zoom = bounds,
        }
        self
    }

    pub fn with_close_threshold(mut self, threshold: f32) -> Self {
        self.close_threshold = threshold;
        self
    }

    pub fn with_settle(mut self, settle: AnimationSpec) -> Self {
        self.settle = settle;
        self
    }

    pub fn hold_delay(&self) -> Duration {
        Duration::from_millis(self.hold_delay_millis)
    }

    pub fn wheel_settle_delay(&self) -> Duration {
        Duration::from_millis(self.wheel_settle_delay_millis)
    }

    pub fn double_tap_window(&self) -> Duration {
        Duration::from_millis(self.double_tap_window_millis)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.desktop_zoom.validate("lightbox.desktop_zoom")?;
        self.tablet_zoom.validate("lightbox.tablet_zoom")?;
        self.mobile_zoom.validate("lightbox.mobile_zoom")?;
        let floor = self
            .desktop_zoom
            .min
            .min(self.tablet_zoom.min)
            .min(self.mobile_zoom.min);
        ensure_range("lightbox.close_threshold", self.close_threshold, 0.0, floor)?;
        ensure_range("lightbox.pinch_resistance", self.pinch_resistance, 0.0, 1.0)?;
        ensure_range("lightbox.wheel_overshoot", self.wheel_overshoot, 0.0, 0.9)?;
        ensure_positive("lightbox.wheel_zoom_gain", self.wheel_zoom_gain)?;
        ensure_positive("lightbox.tap_slop", self.tap_slop)
    }
}
