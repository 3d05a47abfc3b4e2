//! Coarse device classification from viewport geometry.
//!
//! Several tunables (spot counts, pointer repulsion, lightbox zoom bounds)
//! depend on whether the page runs on a phone, a tablet or a desktop. The
//! class is derived from the viewport alone; no user-agent sniffing.

use kinetic_core::{ensure_ordered, ensure_positive, ConfigError};
use kinetic_graphics::Size;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceClass {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl DeviceClass {
    /// Classifies a viewport. Empty viewports (not yet mounted) count as desktop.
    pub fn classify(viewport: Size, breakpoints: &DeviceBreakpoints) -> Self {
        let Some(aspect) = viewport.aspect_ratio() else {
            return DeviceClass::Desktop;
        };
        if viewport.width < breakpoints.mobile_max_width {
            DeviceClass::Mobile
        } else if viewport.width < breakpoints.tablet_max_width
            || aspect < breakpoints.portrait_aspect
        {
            DeviceClass::Tablet
        } else {
            DeviceClass::Desktop
        }
    }

    /// Touch is the primary input everywhere but desktop.
    pub fn is_touch_primary(&self) -> bool {
        !matches!(self, DeviceClass::Desktop)
    }
}

/// Viewport breakpoints in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceBreakpoints {
    /// Viewports narrower than this are phones.
    pub mobile_max_width: f32,
    /// Viewports narrower than this (and not phones) are tablets.
    pub tablet_max_width: f32,
    /// Wide viewports taller than they are wide (width / height below this)
    /// are still treated as tablets.
    pub portrait_aspect: f32,
}

impl Default for DeviceBreakpoints {
    fn default() -> Self {
        Self {
            mobile_max_width: 768.0,
            tablet_max_width: 1200.0,
            portrait_aspect: 1.0,
        }
    }
}

impl DeviceBreakpoints {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("devices.mobile_max_width", self.mobile_max_width)?;
        ensure_positive("devices.portrait_aspect", self.portrait_aspect)?;
        ensure_ordered(
            "devices.mobile_max_width..tablet_max_width",
            self.mobile_max_width,
            self.tablet_max_width,
        )
    }
}
