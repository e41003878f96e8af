//! Feedforward from the reference trajectory.

use serde::Deserialize;

/// Static, velocity and acceleration feedforward.
///
/// Output is in the same normalized units as the PID output and is summed
/// with it before the final clamp.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Feedforward {
    /// Static friction term, applied in the direction of motion.
    #[serde(default)]
    pub ks: f64,
    /// Output per unit of reference velocity.
    #[serde(default)]
    pub kv: f64,
    /// Output per unit of reference acceleration.
    #[serde(default)]
    pub ka: f64,
}

impl Feedforward {
    /// Create a new feedforward term.
    pub const fn new(ks: f64, kv: f64, ka: f64) -> Self {
        Self { ks, kv, ka }
    }

    /// Feedforward output for a reference velocity and acceleration.
    ///
    /// The static term is zero while the reference is at rest.
    pub fn calculate(&self, velocity: f64, acceleration: f64) -> f64 {
        let friction = if velocity == 0.0 {
            0.0
        } else {
            libm::copysign(self.ks, velocity)
        };
        friction + self.kv * velocity + self.ka * acceleration
    }

    /// True when every coefficient is zero.
    pub fn is_zero(&self) -> bool {
        self.ks == 0.0 && self.kv == 0.0 && self.ka == 0.0
    }
}
