//! Motion module for servo-motion.
//!
//! Provides jerk-limited move planning and reference trajectory sampling.

mod plan;
mod scurve;
mod state;

pub use plan::{MotionPhase, PlanRegime, ProfilePlan};
pub use scurve::{Direction, SCurveProfile};
pub use state::KinematicState;
