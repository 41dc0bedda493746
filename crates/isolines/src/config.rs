//! Configuration for isoline building, filtering and labelling.

use crate::error::{IsolineError, Result};
use serde::{Deserialize, Serialize};

/// Tunables for the whole isoline pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsolineConfig {
    /// Number of levels generated across the field's value range.
    pub density: usize,

    /// Path length between two text labels, in data units.
    pub label_spacing: f64,

    /// Maximum number of points kept per line by the count filter.
    pub max_points: usize,

    /// Turning angle in degrees below which the inclination filter keeps a point.
    pub critical_angle: f64,
}

impl Default for IsolineConfig {
    fn default() -> Self {
        Self {
            density: 12,
            label_spacing: 10.0,
            max_points: 300,
            critical_angle: 178.0,
        }
    }
}

impl IsolineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("ISOLINE_DENSITY") {
            if let Ok(density) = val.parse() {
                config.density = density;
            }
        }

        if let Ok(val) = std::env::var("ISOLINE_LABEL_SPACING") {
            if let Ok(spacing) = val.parse() {
                config.label_spacing = spacing;
            }
        }

        if let Ok(val) = std::env::var("ISOLINE_MAX_POINTS") {
            if let Ok(max) = val.parse() {
                config.max_points = max;
            }
        }

        if let Ok(val) = std::env::var("ISOLINE_CRITICAL_ANGLE") {
            if let Ok(angle) = val.parse() {
                config.critical_angle = angle;
            }
        }

        config
    }

    /// Load configuration from a JSON document. Missing keys keep defaults.
    pub fn from_json(json_str: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.density == 0 {
            return Err(IsolineError::invalid_config("density must be > 0"));
        }

        if !self.label_spacing.is_finite() || self.label_spacing <= 0.0 {
            return Err(IsolineError::invalid_config(
                "label_spacing must be a positive number",
            ));
        }

        if self.max_points == 0 {
            return Err(IsolineError::invalid_config("max_points must be > 0"));
        }

        if !(self.critical_angle > 0.0 && self.critical_angle <= 180.0) {
            return Err(IsolineError::invalid_config(
                "critical_angle must be in (0, 180] degrees",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = IsolineConfig::default();
        assert_eq!(config.density, 12);
        assert_eq!(config.label_spacing, 10.0);
        assert_eq!(config.max_points, 300);
        assert_eq!(config.critical_angle, 178.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = IsolineConfig::default();
        config.density = 0;
        assert!(config.validate().is_err());

        let mut config = IsolineConfig::default();
        config.label_spacing = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = IsolineConfig::default();
        config.max_points = 0;
        assert!(config.validate().is_err());

        let mut config = IsolineConfig::default();
        config.critical_angle = 181.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = IsolineConfig::from_json(r#"{"density": 5, "critical_angle": 170.0}"#).unwrap();
        assert_eq!(config.density, 5);
        assert_eq!(config.critical_angle, 170.0);
        assert_eq!(config.max_points, 300);
    }
}
