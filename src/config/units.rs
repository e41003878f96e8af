//! Unit types for time quantities.
//!
//! Control periods are written in milliseconds in configuration files and used
//! in seconds by the profile and controller math. The newtypes keep the two
//! from being mixed up.

use core::ops::{Add, Mul};

use serde::Deserialize;

/// Duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Seconds(pub f64);

impl Seconds {
    /// Create a new Seconds value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Convert to milliseconds.
    #[inline]
    pub fn to_millis(self) -> Milliseconds {
        Milliseconds(self.0 * 1_000.0)
    }

    /// True for a finite, strictly positive duration.
    #[inline]
    pub fn is_valid_period(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl Add for Seconds {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<f64> for Seconds {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Duration in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Milliseconds(pub f64);

impl Milliseconds {
    /// Create a new Milliseconds value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Convert to seconds.
    #[inline]
    pub fn to_seconds(self) -> Seconds {
        Seconds(self.0 / 1_000.0)
    }
}

impl From<Milliseconds> for Seconds {
    fn from(ms: Milliseconds) -> Self {
        ms.to_seconds()
    }
}

impl From<Seconds> for Milliseconds {
    fn from(s: Seconds) -> Self {
        s.to_millis()
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Seconds.
    fn seconds(self) -> Seconds;
    /// Convert to Milliseconds.
    fn millis(self) -> Milliseconds;
}

impl UnitExt for f64 {
    #[inline]
    fn seconds(self) -> Seconds {
        Seconds(self)
    }

    #[inline]
    fn millis(self) -> Milliseconds {
        Milliseconds(self)
    }
}
