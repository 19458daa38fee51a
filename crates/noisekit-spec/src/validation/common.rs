//! Common validation utilities shared by every parameter record.
//!
//! Each helper returns a [`ConfigurationError`] naming the field and the
//! violated constraint.

use crate::error::ConfigurationError;

/// Largest width or height a single buffer may have.
pub const MAX_DIMENSION: u32 = 4096;

/// Validate that a resolution is positive and within [`MAX_DIMENSION`].
///
/// # Example
/// ```
/// use noisekit_spec::validation::common::validate_resolution;
///
/// assert!(validate_resolution(1024, 1024).is_ok());
/// assert!(validate_resolution(0, 100).is_err());
/// ```
pub fn validate_resolution(width: u32, height: u32) -> Result<(), ConfigurationError> {
    if width == 0 || height == 0 {
        return Err(ConfigurationError::new(
            "resolution",
            format!("must be at least 1x1, got [{}, {}]", width, height),
        ));
    }

    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(ConfigurationError::new(
            "resolution",
            format!(
                "is too large: max is {}x{}, got [{}, {}]",
                MAX_DIMENSION, MAX_DIMENSION, width, height
            ),
        ));
    }

    Ok(())
}

/// Validate that a value is finite.
pub fn validate_finite(name: &str, value: f64) -> Result<(), ConfigurationError> {
    if !value.is_finite() {
        return Err(ConfigurationError::new(
            name,
            format!("must be finite, got {}", value),
        ));
    }
    Ok(())
}

/// Validate that a value is in [0, 1] (the unit interval).
///
/// # Example
/// ```
/// use noisekit_spec::validation::common::validate_unit_interval;
///
/// assert!(validate_unit_interval("alpha", 0.5).is_ok());
/// assert!(validate_unit_interval("alpha", 1.5).is_err());
/// ```
pub fn validate_unit_interval(name: &str, value: f64) -> Result<(), ConfigurationError> {
    validate_finite(name, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigurationError::new(
            name,
            format!("must be in [0, 1], got {}", value),
        ));
    }
    Ok(())
}

/// Validate that a value is positive (> 0).
///
/// # Example
/// ```
/// use noisekit_spec::validation::common::validate_positive;
///
/// assert!(validate_positive("scale", 1.0).is_ok());
/// assert!(validate_positive("scale", 0.0).is_err());
/// assert!(validate_positive("scale", -1.0).is_err());
/// ```
pub fn validate_positive(name: &str, value: f64) -> Result<(), ConfigurationError> {
    validate_finite(name, value)?;
    if value <= 0.0 {
        return Err(ConfigurationError::new(
            name,
            format!("must be positive, got {}", value),
        ));
    }
    Ok(())
}

/// Validate that a value is non-negative (>= 0).
pub fn validate_non_negative(name: &str, value: f64) -> Result<(), ConfigurationError> {
    validate_finite(name, value)?;
    if value < 0.0 {
        return Err(ConfigurationError::new(
            name,
            format!("must be non-negative, got {}", value),
        ));
    }
    Ok(())
}

/// Validate that a value is within a specified range [min, max].
///
/// # Example
/// ```
/// use noisekit_spec::validation::common::validate_range;
///
/// assert!(validate_range("lacunarity", 2.0, 1.0, 8.0).is_ok());
/// assert!(validate_range("lacunarity", 0.5, 1.0, 8.0).is_err());
/// ```
pub fn validate_range(name: &str, value: f64, min: f64, max: f64) -> Result<(), ConfigurationError> {
    validate_finite(name, value)?;
    if value < min || value > max {
        return Err(ConfigurationError::new(
            name,
            format!("must be in [{}, {}], got {}", min, max, value),
        ));
    }
    Ok(())
}

/// Validate that an integer count is within [min, max].
pub fn validate_count(name: &str, value: u32, min: u32, max: u32) -> Result<(), ConfigurationError> {
    if value < min || value > max {
        return Err(ConfigurationError::new(
            name,
            format!("must be in [{}, {}], got {}", min, max, value),
        ));
    }
    Ok(())
}
