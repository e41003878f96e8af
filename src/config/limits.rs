//! Kinematic and soft position limits.

use serde::Deserialize;

use crate::error::ConfigError;

/// Velocity, acceleration and jerk bounds for one profile.
///
/// Validated at construction: every bound must be finite and strictly
/// positive, so the planning math never divides by zero or takes the root of a
/// negative number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicLimits {
    max_velocity: f64,
    max_acceleration: f64,
    max_jerk: f64,
}

impl KinematicLimits {
    /// Create validated kinematic limits.
    ///
    /// # Errors
    ///
    /// Returns the `ConfigError` variant naming the first offending bound.
    pub fn new(max_velocity: f64, max_acceleration: f64, max_jerk: f64) -> Result<Self, ConfigError> {
        if !is_positive(max_velocity) {
            return Err(ConfigError::InvalidMaxVelocity(max_velocity));
        }
        if !is_positive(max_acceleration) {
            return Err(ConfigError::InvalidMaxAcceleration(max_acceleration));
        }
        if !is_positive(max_jerk) {
            return Err(ConfigError::InvalidMaxJerk(max_jerk));
        }

        Ok(Self {
            max_velocity,
            max_acceleration,
            max_jerk,
        })
    }

    /// Maximum velocity.
    #[inline]
    pub const fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    /// Maximum acceleration.
    #[inline]
    pub const fn max_acceleration(&self) -> f64 {
        self.max_acceleration
    }

    /// Maximum jerk.
    #[inline]
    pub const fn max_jerk(&self) -> f64 {
        self.max_jerk
    }

    /// Acceleration actually reachable while respecting `max_velocity`.
    ///
    /// Ramping to `max_acceleration` and back down at `max_jerk` gains
    /// `a^2 / j` of velocity; when that exceeds `max_velocity` the cap drops to
    /// `sqrt(v * j)`.
    #[inline]
    pub fn effective_acceleration(&self) -> f64 {
        let a = self.max_acceleration;
        if self.max_velocity * self.max_jerk < a * a {
            libm::sqrt(self.max_velocity * self.max_jerk)
        } else {
            a
        }
    }
}

#[inline]
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Policy for handling soft limit violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitPolicy {
    /// Reject moves that would exceed limits.
    #[default]
    Reject,
    /// Clamp target to nearest limit.
    Clamp,
}

/// Soft position limits for a mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SoftLimits {
    /// Minimum allowed position.
    pub min: f64,

    /// Maximum allowed position.
    pub max: f64,

    /// What to do when limit is exceeded.
    #[serde(default)]
    pub policy: LimitPolicy,
}

impl SoftLimits {
    /// Create new soft limits.
    pub fn new(min: f64, max: f64, policy: LimitPolicy) -> Self {
        Self { min, max, policy }
    }

    /// Check if limits are valid (min < max).
    pub fn is_valid(&self) -> bool {
        self.min < self.max
    }

    /// Check if a position is within limits.
    pub fn contains(&self, position: f64) -> bool {
        position >= self.min && position <= self.max
    }

    /// Apply limit policy to a target position.
    ///
    /// Returns `Some(position)` if valid or clamped, `None` if rejected.
    pub fn apply(&self, target: f64) -> Option<f64> {
        if self.contains(target) {
            Some(target)
        } else {
            match self.policy {
                LimitPolicy::Reject => None,
                LimitPolicy::Clamp => {
                    if target < self.min {
                        Some(self.min)
                    } else {
                        Some(self.max)
                    }
                }
            }
        }
    }
}
