//! Tests for isoline configuration.

use isolines::{IsolineConfig, IsolineError};

#[test]
fn test_default_config() {
    let config = IsolineConfig::default();
    assert_eq!(config.density, 12);
    assert_eq!(config.label_spacing, 10.0);
    assert_eq!(config.max_points, 300);
    assert_eq!(config.critical_angle, 178.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_from_env() {
    std::env::set_var("ISOLINE_DENSITY", "20");
    std::env::set_var("ISOLINE_LABEL_SPACING", "2.5");
    std::env::set_var("ISOLINE_MAX_POINTS", "not-a-number");
    std::env::remove_var("ISOLINE_CRITICAL_ANGLE");

    let config = IsolineConfig::from_env();

    std::env::remove_var("ISOLINE_DENSITY");
    std::env::remove_var("ISOLINE_LABEL_SPACING");
    std::env::remove_var("ISOLINE_MAX_POINTS");

    assert_eq!(config.density, 20);
    assert_eq!(config.label_spacing, 2.5);
    // Unparseable values keep their defaults
    assert_eq!(config.max_points, 300);
    assert_eq!(config.critical_angle, 178.0);
}

#[test]
fn test_config_from_json() {
    let config = IsolineConfig::from_json(r#"{"max_points": 64}"#).unwrap();
    assert_eq!(config.max_points, 64);
    assert_eq!(config.density, 12);

    assert!(IsolineConfig::from_json("{not json").is_err());
}

#[test]
fn test_config_json_round_trip() {
    let config = IsolineConfig {
        density: 7,
        label_spacing: 3.0,
        max_points: 120,
        critical_angle: 175.0,
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(IsolineConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_config_validation_errors() {
    let config = IsolineConfig {
        label_spacing: -1.0,
        ..IsolineConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(IsolineError::InvalidConfig(_))
    ));

    let config = IsolineConfig {
        critical_angle: 0.0,
        ..IsolineConfig::default()
    };
    assert!(config.validate().is_err());
}
