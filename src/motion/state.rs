//! Kinematic state of a single axis.

use core::ops::Neg;

/// Position, velocity and acceleration of the mechanism at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicState {
    /// Position.
    pub position: f64,
    /// Velocity (position units per second).
    pub velocity: f64,
    /// Acceleration (position units per second squared).
    pub acceleration: f64,
}

impl KinematicState {
    /// Create a new state.
    #[inline]
    pub const fn new(position: f64, velocity: f64, acceleration: f64) -> Self {
        Self {
            position,
            velocity,
            acceleration,
        }
    }

    /// A state at rest at `position`.
    #[inline]
    pub const fn at_rest(position: f64) -> Self {
        Self::new(position, 0.0, 0.0)
    }

    /// Shift the position by `offset`, leaving the derivatives untouched.
    #[inline]
    pub fn offset(self, offset: f64) -> Self {
        Self {
            position: self.position + offset,
            ..self
        }
    }
}

impl Neg for KinematicState {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.position, -self.velocity, -self.acceleration)
    }
}
