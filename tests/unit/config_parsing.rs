//! Unit tests for TOML configuration parsing.

use servo_motion::config::{load_config, LimitPolicy, SystemConfig};
use servo_motion::error::{ConfigError, Error};

/// Test parsing a valid mechanism configuration from TOML.
#[test]
fn test_parse_mechanism_config() {
    let toml_str = r#"
[mechanisms.arm]
name = "shoulder"
max_velocity = 3.0
max_acceleration = 6.0
max_jerk = 40.0
tolerance = 0.005
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let arm = config.mechanism("arm").expect("Mechanism not found");

    assert_eq!(arm.name.as_str(), "shoulder");
    assert_eq!(arm.max_velocity, 3.0);
    assert_eq!(arm.max_acceleration, 6.0);
    assert_eq!(arm.max_jerk, 40.0);
    assert_eq!(arm.tolerance, 0.005);
}

/// Test parsing gains, feedforward and presets.
#[test]
fn test_parse_gains_feedforward_presets() {
    let toml_str = r#"
[mechanisms.elevator]
name = "elevator"
max_velocity = 1.0
max_acceleration = 2.0
max_jerk = 10.0

[mechanisms.elevator.gains]
kp = 4.0
ki = 0.2
exponent = 1.5

[mechanisms.elevator.feedforward]
ks = 0.05
kv = 0.8

[mechanisms.elevator.presets]
floor = 0.0
scoring = 0.9
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let elevator = config.mechanism("elevator").unwrap();

    let gains = elevator.gains.gains();
    assert_eq!(gains.kp, 4.0);
    assert_eq!(gains.ki, 0.2);
    assert_eq!(gains.kd, 0.0);
    assert_eq!(gains.exponent, 1.5);
    assert_eq!(elevator.gains.integrator_min, -1.0);
    assert_eq!(elevator.gains.integrator_max, 1.0);

    assert_eq!(elevator.feedforward.ks, 0.05);
    assert_eq!(elevator.feedforward.kv, 0.8);
    assert_eq!(elevator.feedforward.ka, 0.0);

    assert_eq!(elevator.preset("scoring"), Some(0.9));
    assert_eq!(elevator.preset("missing"), None);
}

/// Test parsing soft limits with a clamp policy.
#[test]
fn test_parse_soft_limits() {
    let toml_str = r#"
[mechanisms.wrist]
name = "wrist"
max_velocity = 5.0
max_acceleration = 10.0
max_jerk = 100.0

[mechanisms.wrist.limits]
min = -1.57
max = 1.57
policy = "clamp"
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let limits = config.mechanism("wrist").unwrap().limits.unwrap();

    assert_eq!(limits.min, -1.57);
    assert_eq!(limits.max, 1.57);
    assert_eq!(limits.policy, LimitPolicy::Clamp);
}

/// Test multiple mechanisms keep their names and order.
#[test]
fn test_parse_multiple_mechanisms() {
    let toml_str = r#"
control_period_ms = 5.0

[mechanisms.pan]
name = "pan"
max_velocity = 1.0
max_acceleration = 1.0
max_jerk = 1.0

[mechanisms.tilt]
name = "tilt"
max_velocity = 1.0
max_acceleration = 1.0
max_jerk = 1.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let names: Vec<_> = config.mechanism_names().collect();

    assert_eq!(names, ["pan", "tilt"]);
    assert_eq!(config.control_period.value(), 5.0);
}

/// Test an unknown policy string is a parse error.
#[test]
fn test_invalid_policy_rejected() {
    let toml_str = r#"
[mechanisms.arm]
name = "arm"
max_velocity = 1.0
max_acceleration = 1.0
max_jerk = 1.0

[mechanisms.arm.limits]
min = 0.0
max = 1.0
policy = "ignore"
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test loading from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("servo_motion_load_config_test.toml");
    std::fs::write(
        &path,
        r#"
[mechanisms.arm]
name = "arm"
max_velocity = 2.0
max_acceleration = 4.0
max_jerk = 20.0
"#,
    )
    .expect("Failed to write temp config");

    let config = load_config(&path).expect("Failed to load config");
    let _ = std::fs::remove_file(&path);

    assert!(config.mechanism("arm").is_some());
}

/// Test a missing file is reported as an I/O error.
#[test]
fn test_load_config_missing_file() {
    let result = load_config("/nonexistent/servo_motion/config.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}
