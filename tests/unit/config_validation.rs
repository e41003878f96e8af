//! Unit tests for configuration validation.

use servo_motion::config::{parse_config, validate_config, SystemConfig};
use servo_motion::error::{ConfigError, Error, MotionError};

fn mechanism_with(extra: &str) -> String {
    format!(
        r#"
[mechanisms.arm]
name = "arm"
max_velocity = 2.0
max_acceleration = 4.0
max_jerk = 20.0
{extra}
"#
    )
}

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let config: SystemConfig =
        toml::from_str(&mechanism_with("")).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a non-positive jerk.
#[test]
fn test_invalid_max_jerk() {
    let toml_str = r#"
[mechanisms.arm]
name = "arm"
max_velocity = 2.0
max_acceleration = 4.0
max_jerk = 0.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMaxJerk(0.0)))
    );
}

/// Test validation fails for a negative velocity.
#[test]
fn test_invalid_max_velocity() {
    let toml_str = r#"
[mechanisms.arm]
name = "arm"
max_velocity = -1.0
max_acceleration = 4.0
max_jerk = 20.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMaxVelocity(_)))
    ));
}

/// Test validation fails for a zero control period.
#[test]
fn test_invalid_control_period() {
    let toml_str = format!("control_period_ms = 0.0\n{}", mechanism_with(""));

    let config: SystemConfig = toml::from_str(&toml_str).expect("Failed to parse TOML");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidControlPeriod(_)))
    ));
}

/// Test validation fails for a non-positive exponent.
#[test]
fn test_invalid_exponent() {
    let config: SystemConfig = toml::from_str(&mechanism_with(
        r#"
[mechanisms.arm.gains]
kp = 1.0
exponent = 0.0
"#,
    ))
    .expect("Failed to parse TOML");

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidExponent(_)))
    ));
}

/// Test validation fails for an inverted integrator range.
#[test]
fn test_invalid_integrator_range() {
    let config: SystemConfig = toml::from_str(&mechanism_with(
        r#"
[mechanisms.arm.gains]
integrator_min = 0.5
integrator_max = -0.5
"#,
    ))
    .expect("Failed to parse TOML");

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidIntegratorRange { min: 0.5, max: -0.5 }))
    );
}

/// Test validation fails for a negative tolerance.
#[test]
fn test_invalid_tolerance() {
    let config: SystemConfig =
        toml::from_str(&mechanism_with("tolerance = -0.1")).expect("Failed to parse TOML");

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidTolerance(_)))
    ));
}

/// Test validation fails for invalid soft limits (min >= max).
#[test]
fn test_invalid_soft_limits() {
    let config: SystemConfig = toml::from_str(&mechanism_with(
        r#"
[mechanisms.arm.limits]
min = 1.0
max = -1.0
"#,
    ))
    .expect("Failed to parse TOML");

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidSoftLimits { .. }))
    ));
}

/// Test a preset outside rejecting limits fails validation.
#[test]
fn test_preset_outside_rejecting_limits() {
    let config: SystemConfig = toml::from_str(&mechanism_with(
        r#"
[mechanisms.arm.limits]
min = -1.0
max = 1.0
policy = "reject"

[mechanisms.arm.presets]
stow = 2.0
"#,
    ))
    .expect("Failed to parse TOML");

    assert!(matches!(
        validate_config(&config),
        Err(Error::Motion(MotionError::TargetOutOfRange { target, .. })) if target == 2.0
    ));
}

/// Test a preset outside clamping limits is accepted.
#[test]
fn test_preset_outside_clamping_limits() {
    let config: SystemConfig = toml::from_str(&mechanism_with(
        r#"
[mechanisms.arm.limits]
min = -1.0
max = 1.0
policy = "clamp"

[mechanisms.arm.presets]
stow = 2.0
"#,
    ))
    .expect("Failed to parse TOML");

    assert!(validate_config(&config).is_ok());
}

/// Test parse_config runs validation.
#[test]
fn test_parse_config_validates() {
    let toml_str = r#"
[mechanisms.arm]
name = "arm"
max_velocity = 2.0
max_acceleration = 0.0
max_jerk = 20.0
"#;

    assert!(matches!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::InvalidMaxAcceleration(_)))
    ));
}
