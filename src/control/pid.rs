//! Exponential PID controller.
//!
//! Linear PID with the proportional term reshaped as
//! `sign(e) * |e|^exponent * kp`. An exponent above one softens the response
//! to small errors while keeping large-error correction aggressive. I and D
//! stay linear; D acts on the measurement so setpoint steps do not kick the
//! output.

use crate::config::units::Seconds;
use crate::error::{ConfigError, Result};

/// Default control period (50 Hz).
pub const DEFAULT_PERIOD: Seconds = Seconds(0.020);

/// Tuning parameters of an [`ExponentialPid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidGains {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
    /// P-term exponent (1.0 = linear).
    pub exponent: f64,
}

impl PidGains {
    /// Create a gain set.
    pub const fn new(kp: f64, ki: f64, kd: f64, exponent: f64) -> Self {
        Self { kp, ki, kd, exponent }
    }
}

impl Default for PidGains {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

/// PID controller with an exponentially scaled P term and output in `[-1, 1]`.
///
/// Assumes `calculate` runs once per fixed period; the period is fixed at
/// construction rather than measured.
#[derive(Debug, Clone)]
pub struct ExponentialPid {
    gains: PidGains,
    period: f64,

    setpoint: f64,
    prev_measurement: f64,
    integrator: f64,
    integrator_min: f64,
    integrator_max: f64,
    first_run: bool,
}

impl ExponentialPid {
    /// Create a controller running at [`DEFAULT_PERIOD`].
    pub fn new(kp: f64, ki: f64, kd: f64, exponent: f64) -> Self {
        Self::from_gains(PidGains::new(kp, ki, kd, exponent))
    }

    /// Create a controller from a gain set running at [`DEFAULT_PERIOD`].
    pub fn from_gains(gains: PidGains) -> Self {
        Self {
            gains,
            period: DEFAULT_PERIOD.value(),
            setpoint: 0.0,
            prev_measurement: 0.0,
            integrator: 0.0,
            integrator_min: -1.0,
            integrator_max: 1.0,
            first_run: true,
        }
    }

    /// Use a control period other than [`DEFAULT_PERIOD`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidControlPeriod` unless the period is finite
    /// and positive.
    pub fn with_period(mut self, period: Seconds) -> Result<Self> {
        if !period.is_valid_period() {
            return Err(ConfigError::InvalidControlPeriod(period.value()).into());
        }
        self.period = period.value();
        Ok(self)
    }

    /// Set the target value; used from the next `calculate`.
    #[inline]
    pub fn set_setpoint(&mut self, setpoint: f64) {
        self.setpoint = setpoint;
    }

    /// Current target value.
    #[inline]
    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    /// Clear integrator and derivative memory.
    ///
    /// Call at the start of every independent motion; the controller never
    /// resets itself.
    pub fn reset(&mut self) {
        self.integrator = 0.0;
        self.prev_measurement = 0.0;
        self.first_run = true;
    }

    /// Bound the integrator accumulator (defaults to `[-1, 1]`).
    ///
    /// An inverted range pins the accumulator to `max`.
    pub fn set_integrator_range(&mut self, min: f64, max: f64) {
        self.integrator_min = min;
        self.integrator_max = max;
    }

    /// Integrator bounds as `(min, max)`.
    #[inline]
    pub fn integrator_range(&self) -> (f64, f64) {
        (self.integrator_min, self.integrator_max)
    }

    /// Compute the control output for `measurement`, in `[-1, 1]`.
    pub fn calculate(&mut self, measurement: f64) -> f64 {
        let error = self.setpoint - measurement;

        let magnitude = libm::pow(libm::fabs(error), self.gains.exponent);
        let p = libm::copysign(magnitude, error) * self.gains.kp;

        let accumulated = self.integrator + error * self.period;
        self.integrator = accumulated.max(self.integrator_min).min(self.integrator_max);
        if self.integrator != accumulated {
            trace!("integrator saturated at {}", self.integrator);
        }
        let i = self.integrator * self.gains.ki;

        let d = if self.first_run {
            0.0
        } else {
            -(measurement - self.prev_measurement) / self.period * self.gains.kd
        };

        self.prev_measurement = measurement;
        self.first_run = false;

        (p + i + d).clamp(-1.0, 1.0)
    }

    /// Accumulated `error * period`, after clamping.
    #[inline]
    pub fn integrator(&self) -> f64 {
        self.integrator
    }

    /// Control period in seconds.
    #[inline]
    pub fn period(&self) -> Seconds {
        Seconds(self.period)
    }

    /// Replace all gains at once.
    #[inline]
    pub fn set_gains(&mut self, gains: PidGains) {
        self.gains = gains;
    }

    /// Current gains.
    #[inline]
    pub fn gains(&self) -> PidGains {
        self.gains
    }

    /// Set the proportional gain.
    #[inline]
    pub fn set_p(&mut self, kp: f64) {
        self.gains.kp = kp;
    }

    /// Set the integral gain.
    #[inline]
    pub fn set_i(&mut self, ki: f64) {
        self.gains.ki = ki;
    }

    /// Set the derivative gain.
    #[inline]
    pub fn set_d(&mut self, kd: f64) {
        self.gains.kd = kd;
    }

    /// Set the P-term exponent.
    #[inline]
    pub fn set_exponent(&mut self, exponent: f64) {
        self.gains.exponent = exponent;
    }

    /// Proportional gain.
    #[inline]
    pub fn p(&self) -> f64 {
        self.gains.kp
    }

    /// Integral gain.
    #[inline]
    pub fn i(&self) -> f64 {
        self.gains.ki
    }

    /// Derivative gain.
    #[inline]
    pub fn d(&self) -> f64 {
        self.gains.kd
    }

    /// P-term exponent.
    #[inline]
    pub fn exponent(&self) -> f64 {
        self.gains.exponent
    }
}
