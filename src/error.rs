//! Error types for servo-motion.
//!
//! The numeric core (profile sampling, PID calculation) never fails. Errors are
//! raised at construction and configuration time, when a target is rejected by
//! soft limits, and when an actuator write fails.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all servo-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motion target rejected
    Motion(MotionError),
    /// Mechanism hardware error
    Mechanism(MechanismError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Mechanism name not found in configuration
    MechanismNotFound(heapless::String<32>),
    /// Preset name not found for a mechanism
    PresetNotFound(heapless::String<32>),
    /// A builder field required to construct a mechanism was not set
    MissingField(&'static str),
    /// Invalid max velocity (must be finite and > 0)
    InvalidMaxVelocity(f64),
    /// Invalid max acceleration (must be finite and > 0)
    InvalidMaxAcceleration(f64),
    /// Invalid max jerk (must be finite and > 0)
    InvalidMaxJerk(f64),
    /// Invalid P-term exponent (must be finite and > 0)
    InvalidExponent(f64),
    /// Invalid integrator range (min must be <= max)
    InvalidIntegratorRange {
        /// Lower accumulator bound
        min: f64,
        /// Upper accumulator bound
        max: f64,
    },
    /// Invalid control period (must be finite and > 0)
    InvalidControlPeriod(f64),
    /// Invalid settle tolerance (must be finite and >= 0)
    InvalidTolerance(f64),
    /// Invalid soft limits (min must be < max)
    InvalidSoftLimits {
        /// Minimum limit value
        min: f64,
        /// Maximum limit value
        max: f64,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Errors raised when commanding a move.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Target lies outside the soft limits and the policy is `Reject`
    TargetOutOfRange {
        /// Requested target position
        target: f64,
        /// Lower soft limit
        min: f64,
        /// Upper soft limit
        max: f64,
    },
    /// Target is NaN or infinite
    NonFiniteTarget,
}

/// Mechanism hardware errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MechanismError {
    /// Writing the output to the actuator failed
    ActuatorFault,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Mechanism(e) => write!(f, "Mechanism error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MechanismNotFound(name) => write!(f, "Mechanism '{}' not found", name),
            ConfigError::PresetNotFound(name) => write!(f, "Preset '{}' not found", name),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::InvalidMaxVelocity(v) => write!(f, "Invalid max velocity: {}. Must be > 0", v),
            ConfigError::InvalidMaxAcceleration(v) => {
                write!(f, "Invalid max acceleration: {}. Must be > 0", v)
            }
            ConfigError::InvalidMaxJerk(v) => write!(f, "Invalid max jerk: {}. Must be > 0", v),
            ConfigError::InvalidExponent(v) => write!(f, "Invalid exponent: {}. Must be > 0", v),
            ConfigError::InvalidIntegratorRange { min, max } => {
                write!(f, "Invalid integrator range: min ({}) must be <= max ({})", min, max)
            }
            ConfigError::InvalidControlPeriod(v) => {
                write!(f, "Invalid control period: {} s. Must be > 0", v)
            }
            ConfigError::InvalidTolerance(v) => write!(f, "Invalid tolerance: {}. Must be >= 0", v),
            ConfigError::InvalidSoftLimits { min, max } => {
                write!(f, "Invalid soft limits: min ({}) must be < max ({})", min, max)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::TargetOutOfRange { target, min, max } => {
                write!(f, "Target position {} exceeds limits [{}, {}]", target, min, max)
            }
            MotionError::NonFiniteTarget => write!(f, "Target position is not finite"),
        }
    }
}

impl fmt::Display for MechanismError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MechanismError::ActuatorFault => write!(f, "Actuator output write failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<MechanismError> for Error {
    fn from(e: MechanismError) -> Self {
        Error::Mechanism(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for MechanismError {}
