//! Mechanism configuration from TOML.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use crate::control::{Feedforward, PidGains};
use crate::error::ConfigError;

use super::limits::{KinematicLimits, SoftLimits};

/// Maximum number of named presets per mechanism.
pub const MAX_PRESETS: usize = 16;

/// Complete configuration for one actuated mechanism.
#[derive(Debug, Clone, Deserialize)]
pub struct MechanismConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Profile velocity bound (position units per second).
    pub max_velocity: f64,

    /// Profile acceleration bound (position units per second squared).
    pub max_acceleration: f64,

    /// Profile jerk bound (position units per second cubed).
    pub max_jerk: f64,

    /// Position error within which a finished move counts as settled.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Tracking controller tuning.
    #[serde(default)]
    pub gains: GainsConfig,

    /// Feedforward from the reference velocity and acceleration.
    #[serde(default)]
    pub feedforward: Feedforward,

    /// Optional soft position limits.
    #[serde(default)]
    pub limits: Option<SoftLimits>,

    /// Named target positions.
    #[serde(default)]
    pub presets: FnvIndexMap<String<32>, f64, MAX_PRESETS>,
}

fn default_tolerance() -> f64 {
    0.01
}

impl MechanismConfig {
    /// Validated kinematic limits for this mechanism's profile.
    pub fn kinematic_limits(&self) -> Result<KinematicLimits, ConfigError> {
        KinematicLimits::new(self.max_velocity, self.max_acceleration, self.max_jerk)
    }

    /// Look up a preset target position by name.
    pub fn preset(&self, name: &str) -> Option<f64> {
        self.presets
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| *v)
    }

    /// List all preset names.
    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(|s| s.as_str())
    }
}

/// PID tuning as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GainsConfig {
    /// Proportional gain.
    #[serde(default)]
    pub kp: f64,

    /// Integral gain.
    #[serde(default)]
    pub ki: f64,

    /// Derivative gain.
    #[serde(default)]
    pub kd: f64,

    /// P-term exponent (1.0 = linear).
    #[serde(default = "default_exponent")]
    pub exponent: f64,

    /// Lower integrator bound.
    #[serde(default = "default_integrator_min")]
    pub integrator_min: f64,

    /// Upper integrator bound.
    #[serde(default = "default_integrator_max")]
    pub integrator_max: f64,
}

fn default_exponent() -> f64 {
    1.0
}

fn default_integrator_min() -> f64 {
    -1.0
}

fn default_integrator_max() -> f64 {
    1.0
}

impl Default for GainsConfig {
    fn default() -> Self {
        Self {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            exponent: default_exponent(),
            integrator_min: default_integrator_min(),
            integrator_max: default_integrator_max(),
        }
    }
}

impl GainsConfig {
    /// The controller gains without the integrator bounds.
    pub fn gains(&self) -> PidGains {
        PidGains::new(self.kp, self.ki, self.kd, self.exponent)
    }
}
