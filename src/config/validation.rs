//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{MechanismConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Control period is finite and positive
/// - Kinematic limits are finite and positive
/// - Gains: exponent > 0, integrator min <= max
/// - Tolerance is finite and non-negative
/// - Soft limits are valid (min < max) and every preset honors them
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    let period = config.control_period.to_seconds();
    if !period.is_valid_period() {
        return Err(Error::Config(ConfigError::InvalidControlPeriod(period.value())));
    }

    for (name, mechanism) in config.mechanisms.iter() {
        validate_mechanism(name.as_str(), mechanism)?;
    }

    Ok(())
}

pub(crate) fn validate_mechanism(_name: &str, config: &MechanismConfig) -> Result<()> {
    config.kinematic_limits()?;

    let gains = &config.gains;
    if !(gains.exponent.is_finite() && gains.exponent > 0.0) {
        return Err(Error::Config(ConfigError::InvalidExponent(gains.exponent)));
    }
    if !(gains.integrator_min <= gains.integrator_max) {
        return Err(Error::Config(ConfigError::InvalidIntegratorRange {
            min: gains.integrator_min,
            max: gains.integrator_max,
        }));
    }

    if !(config.tolerance.is_finite() && config.tolerance >= 0.0) {
        return Err(Error::Config(ConfigError::InvalidTolerance(config.tolerance)));
    }

    if let Some(ref limits) = config.limits {
        if !limits.is_valid() {
            return Err(Error::Config(ConfigError::InvalidSoftLimits {
                min: limits.min,
                max: limits.max,
            }));
        }

        // Presets are fixed targets; a rejecting limit would fail them on every use
        for (_, &target) in config.presets.iter() {
            if limits.apply(target).is_none() {
                return Err(Error::Motion(crate::error::MotionError::TargetOutOfRange {
                    target,
                    min: limits.min,
                    max: limits.max,
                }));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GainsConfig, LimitPolicy, SoftLimits};
    use crate::control::Feedforward;

    fn make_test_config() -> MechanismConfig {
        MechanismConfig {
            name: heapless::String::try_from("test").unwrap(),
            max_velocity: 2.0,
            max_acceleration: 4.0,
            max_jerk: 20.0,
            tolerance: 0.01,
            gains: GainsConfig::default(),
            feedforward: Feedforward::default(),
            limits: None,
            presets: heapless::FnvIndexMap::new(),
        }
    }

    #[test]
    fn test_valid_mechanism() {
        assert!(validate_mechanism("test", &make_test_config()).is_ok());
    }

    #[test]
    fn test_invalid_integrator_range() {
        let mut config = make_test_config();
        config.gains.integrator_min = 0.5;
        config.gains.integrator_max = -0.5;

        let result = validate_mechanism("test", &config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidIntegratorRange { .. }))
        ));
    }

    #[test]
    fn test_invalid_exponent() {
        let mut config = make_test_config();
        config.gains.exponent = 0.0;
        assert!(matches!(
            validate_mechanism("test", &config),
            Err(Error::Config(ConfigError::InvalidExponent(_)))
        ));
    }

    #[test]
    fn test_preset_outside_rejecting_limits() {
        let mut config = make_test_config();
        config.limits = Some(SoftLimits::new(-1.0, 1.0, LimitPolicy::Reject));
        config
            .presets
            .insert(heapless::String::try_from("far").unwrap(), 2.0)
            .unwrap();

        assert!(matches!(
            validate_mechanism("test", &config),
            Err(Error::Motion(_))
        ));

        config.limits = Some(SoftLimits::new(-1.0, 1.0, LimitPolicy::Clamp));
        assert!(validate_mechanism("test", &config).is_ok());
    }

    #[test]
    fn test_zero_control_period() {
        let config = SystemConfig {
            control_period: crate::config::units::Milliseconds(0.0),
            ..SystemConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidControlPeriod(_)))
        ));
    }
}
