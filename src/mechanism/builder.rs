//! Builder pattern for Mechanism.

use heapless::{FnvIndexMap, String};

use crate::config::units::Seconds;
use crate::config::{KinematicLimits, MechanismConfig, SoftLimits, SystemConfig, MAX_PRESETS};
use crate::control::{ExponentialPid, Feedforward, PidGains, DEFAULT_PERIOD};
use crate::error::{ConfigError, Error, Result};
use crate::motion::SCurveProfile;

use super::actuator::Actuator;
use super::driver::Mechanism;

const DEFAULT_TOLERANCE: f64 = 0.01;

/// Builder for creating Mechanism instances.
pub struct MechanismBuilder<A: Actuator> {
    actuator: Option<A>,
    name: Option<String<32>>,
    limits: Option<(f64, f64, f64)>,
    gains: PidGains,
    integrator_range: (f64, f64),
    feedforward: Feedforward,
    soft_limits: Option<SoftLimits>,
    tolerance: f64,
    period: Seconds,
    presets: FnvIndexMap<String<32>, f64, MAX_PRESETS>,
}

impl<A: Actuator> Default for MechanismBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Actuator> MechanismBuilder<A> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            actuator: None,
            name: None,
            limits: None,
            gains: PidGains::default(),
            integrator_range: (-1.0, 1.0),
            feedforward: Feedforward::default(),
            soft_limits: None,
            tolerance: DEFAULT_TOLERANCE,
            period: DEFAULT_PERIOD,
            presets: FnvIndexMap::new(),
        }
    }

    /// Set the actuator.
    pub fn actuator(mut self, actuator: A) -> Self {
        self.actuator = Some(actuator);
        self
    }

    /// Set the mechanism name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = String::try_from(name).ok();
        self
    }

    /// Set the profile's velocity, acceleration and jerk bounds.
    pub fn limits(mut self, max_velocity: f64, max_acceleration: f64, max_jerk: f64) -> Self {
        self.limits = Some((max_velocity, max_acceleration, max_jerk));
        self
    }

    /// Set the tracking controller gains.
    pub fn gains(mut self, gains: PidGains) -> Self {
        self.gains = gains;
        self
    }

    /// Set the integral accumulator bounds.
    pub fn integrator_range(mut self, min: f64, max: f64) -> Self {
        self.integrator_range = (min, max);
        self
    }

    /// Set the feedforward term.
    pub fn feedforward(mut self, feedforward: Feedforward) -> Self {
        self.feedforward = feedforward;
        self
    }

    /// Set soft position limits.
    pub fn soft_limits(mut self, limits: SoftLimits) -> Self {
        self.soft_limits = Some(limits);
        self
    }

    /// Set the settle tolerance used by `at_goal`.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the control period. Defaults to 20 ms.
    pub fn control_period(mut self, period: Seconds) -> Self {
        self.period = period;
        self
    }

    /// Add a named preset target.
    ///
    /// Presets beyond capacity are dropped.
    pub fn preset(mut self, name: &str, position: f64) -> Self {
        if let Ok(key) = String::try_from(name) {
            let _ = self.presets.insert(key, position);
        }
        self
    }

    /// Configure from a MechanismConfig.
    pub fn from_mechanism_config(mut self, config: &MechanismConfig) -> Self {
        self.name = Some(config.name.clone());
        self.limits = Some((config.max_velocity, config.max_acceleration, config.max_jerk));
        self.gains = config.gains.gains();
        self.integrator_range = (config.gains.integrator_min, config.gains.integrator_max);
        self.feedforward = config.feedforward;
        self.soft_limits = config.limits;
        self.tolerance = config.tolerance;
        self.presets = config.presets.clone();
        self
    }

    /// Configure from SystemConfig by mechanism name.
    ///
    /// Also takes the system control period.
    pub fn from_config(mut self, config: &SystemConfig, mechanism_name: &str) -> Result<Self> {
        let mechanism = config.mechanism(mechanism_name).ok_or_else(|| {
            Error::Config(ConfigError::MechanismNotFound(
                String::try_from(mechanism_name).unwrap_or_default(),
            ))
        })?;

        self.period = config.control_period.to_seconds();
        Ok(self.from_mechanism_config(mechanism))
    }

    /// Build the Mechanism.
    ///
    /// # Errors
    ///
    /// Returns an error if the actuator or limits are missing, or if any
    /// parameter is out of range.
    pub fn build(self) -> Result<Mechanism<A>> {
        let actuator = self
            .actuator
            .ok_or(Error::Config(ConfigError::MissingField("actuator")))?;

        let (v, a, j) = self
            .limits
            .ok_or(Error::Config(ConfigError::MissingField("limits")))?;
        let limits = KinematicLimits::new(v, a, j)?;

        if !(self.gains.exponent.is_finite() && self.gains.exponent > 0.0) {
            return Err(Error::Config(ConfigError::InvalidExponent(self.gains.exponent)));
        }

        let (min, max) = self.integrator_range;
        if !(min <= max) {
            return Err(Error::Config(ConfigError::InvalidIntegratorRange { min, max }));
        }

        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(Error::Config(ConfigError::InvalidTolerance(self.tolerance)));
        }

        if let Some(ref soft) = self.soft_limits {
            if !soft.is_valid() {
                return Err(Error::Config(ConfigError::InvalidSoftLimits {
                    min: soft.min,
                    max: soft.max,
                }));
            }
        }

        let mut controller = ExponentialPid::from_gains(self.gains).with_period(self.period)?;
        controller.set_integrator_range(min, max);

        let name = self
            .name
            .unwrap_or_else(|| String::try_from("mechanism").unwrap_or_default());

        Ok(Mechanism::new(
            actuator,
            name,
            SCurveProfile::new(limits),
            controller,
            self.feedforward,
            self.soft_limits,
            self.presets,
            self.tolerance,
        ))
    }
}
