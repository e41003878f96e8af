//! Mechanism run state.

/// What a mechanism is doing at the moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MechanismState {
    /// No move commanded since construction, reset or stop; output is zero.
    #[default]
    Idle,
    /// Following a planned reference trajectory.
    Moving,
    /// Reference finished; controller holds the goal.
    Holding,
}

impl MechanismState {
    /// State name for display/debugging.
    pub fn name(self) -> &'static str {
        match self {
            MechanismState::Idle => "Idle",
            MechanismState::Moving => "Moving",
            MechanismState::Holding => "Holding",
        }
    }

    /// True while the controller drives the actuator.
    pub fn is_active(self) -> bool {
        !matches!(self, MechanismState::Idle)
    }
}
