//! Control module for servo-motion.
//!
//! Provides the exponential PID tracking controller and trajectory feedforward.

mod feedforward;
mod pid;

pub use feedforward::Feedforward;
pub use pid::{ExponentialPid, PidGains, DEFAULT_PERIOD};
