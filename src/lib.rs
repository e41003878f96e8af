//! # servo-motion
//!
//! Jerk-limited S-curve trajectories tracked by an exponential PID, for single
//! actuated axes such as turrets, arms and elevators.
//!
//! ## Features
//!
//! - **S-curve profiles**: seven-phase, rest-to-rest moves bounded in velocity,
//!   acceleration and jerk, with closed-form sampling at any time
//! - **Exponential PID**: proportional term on a signed power of the error,
//!   clamped integrator, derivative on measurement
//! - **Configuration-driven**: define mechanisms, gains and presets in TOML
//! - **embedded-hal 1.0**: H-bridge actuator over `SetDutyCycle` and `OutputPin`
//! - **no_std compatible**: core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use servo_motion::{HBridge, Mechanism, SystemConfig};
//!
//! // Load configuration from TOML
//! let config: SystemConfig = servo_motion::load_config("mechanisms.toml")?;
//!
//! let mut turret = Mechanism::builder()
//!     .from_config(&config, "turret")?
//!     .actuator(HBridge::new(pwm, dir_pin))
//!     .build()?;
//!
//! turret.move_to_preset("stow")?;
//! loop {
//!     turret.tick(encoder.position())?;
//!     // wait for the next control period
//! }
//! ```
//!
//! ## Re-targeting
//!
//! A new goal can be set mid-move. The new profile starts at the current
//! reference position, so position stays continuous, but it is planned from
//! rest: the reference velocity at the switch is not carried into the new
//! plan.
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are in scope for every module
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod control;
pub mod error;
pub mod mechanism;
pub mod motion;

// Re-exports for ergonomic API
pub use config::{
    validate_config, GainsConfig, KinematicLimits, LimitPolicy, MechanismConfig, SoftLimits,
    SystemConfig,
};
pub use control::{ExponentialPid, Feedforward, PidGains};
pub use error::{Error, Result};
pub use mechanism::{Actuator, HBridge, Mechanism, MechanismBuilder, MechanismState};
pub use motion::{Direction, KinematicState, MotionPhase, PlanRegime, ProfilePlan, SCurveProfile};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Milliseconds, Seconds};
