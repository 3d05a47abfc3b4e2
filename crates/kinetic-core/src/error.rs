//! Configuration validation errors.
//!
//! Runtime paths never fail; invalid configuration is the only error surface.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must lie in {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field}: minimum {min} exceeds maximum {max}")]
    Inverted {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

pub fn ensure_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

pub fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub fn ensure_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

pub fn ensure_ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    ensure_finite(field, min)?;
    ensure_finite(field, max)?;
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::Inverted { field, min, max })
    }
}
