use kinetic_ambient::{FieldConfig, TrailConfig};
use kinetic_core::ConfigError;
use kinetic_foundation::{DeviceBreakpoints, HandoffConfig, LightboxConfig, ScrollConfig};

/// Every tunable of the engine in one place.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    pub scroll: ScrollConfig,
    pub handoff: HandoffConfig,
    pub lightbox: LightboxConfig,
    pub field: FieldConfig,
    pub trail: TrailConfig,
    pub devices: DeviceBreakpoints,
}

impl MotionConfig {
    pub fn with_scroll(mut self, scroll: ScrollConfig) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn with_handoff(mut self, handoff: HandoffConfig) -> Self {
        self.handoff = handoff;
        self
    }

    pub fn with_lightbox(mut self, lightbox: LightboxConfig) -> Self {
        self.lightbox = lightbox;
        self
    }

    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.field = field;
        self
    }

    pub fn with_trail(mut self, trail: TrailConfig) -> Self {
        self.trail = trail;
        self
    }

    pub fn with_devices(mut self, devices: DeviceBreakpoints) -> Self {
        self.devices = devices;
        self
    }

    /// Checks every section; the first violation wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scroll.validate()?;
        self.handoff.validate()?;
        self.lightbox.validate()?;
        self.field.validate()?;
        self.trail.validate()?;
        self.devices.validate()
    }

    /// Parses and validates a TOML document. Missing keys take defaults.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}
