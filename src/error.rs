//! Error types for scene construction

use thiserror::Error;

/// Invalid construction parameters for a layout group
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LayoutError {
    #[error("{name} must be a finite non-negative number, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },

    #[error("scale band [{min}, {max}] must be finite, non-negative and ordered")]
    InvalidBand { min: f32, max: f32 },

    #[error("{name} must lie in {range}, got {value}")]
    OutOfRange { name: &'static str, range: &'static str, value: f32 },

    #[error("palette has no entry with a positive weight")]
    EmptyPalette,
}

/// Errors surfaced while building a scene from configuration
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}

/// Reject negative, NaN or infinite dimensions
pub(crate) fn check_dimension(name: &'static str, value: f32) -> Result<f32, LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::InvalidDimension { name, value })
    }
}

/// Reject values outside the half-open unit interval [0, 1)
pub(crate) fn check_unit_fraction(name: &'static str, value: f32) -> Result<f32, LayoutError> {
    if (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(LayoutError::OutOfRange { name, range: "[0, 1)", value })
    }
}

/// Reject zero, negative or non-finite rates
pub(crate) fn check_rate(name: &'static str, value: f32) -> Result<f32, LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::OutOfRange { name, range: "(0, inf)", value })
    }
}
