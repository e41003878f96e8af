//! Configuration module for servo-motion.
//!
//! Provides types for loading and validating mechanism configurations
//! from TOML files (with `std` feature) or pre-parsed data.

mod limits;
mod mechanism;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use limits::{KinematicLimits, LimitPolicy, SoftLimits};
pub use mechanism::{GainsConfig, MechanismConfig, MAX_PRESETS};
pub use system::{SystemConfig, MAX_MECHANISMS};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Milliseconds, Seconds};
