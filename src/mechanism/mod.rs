//! Mechanism module for servo-motion.
//!
//! Ties a reference trajectory, a tracking controller and an actuator into a
//! single axis that is ticked at a fixed control period.

mod actuator;
mod builder;
mod driver;
mod state;

pub use actuator::{Actuator, HBridge};
pub use builder::MechanismBuilder;
pub use driver::Mechanism;
pub use state::MechanismState;

impl<A: Actuator> Mechanism<A> {
    /// Start building a mechanism.
    pub fn builder() -> MechanismBuilder<A> {
        MechanismBuilder::new()
    }
}
