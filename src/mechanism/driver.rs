//! Single-axis mechanism controller.
//!
//! Composes the S-curve reference, the exponential PID and feedforward into
//! the per-tick sequence: advance the reference, track it, drive the actuator.

use heapless::{FnvIndexMap, String};

use crate::config::{SoftLimits, MAX_PRESETS};
use crate::control::{ExponentialPid, Feedforward};
use crate::error::{ConfigError, Error, MotionError, Result};
use crate::motion::{KinematicState, SCurveProfile};

use super::actuator::Actuator;
use super::state::MechanismState;

/// One actuated axis: trajectory, tracking controller and actuator.
///
/// Generic over the actuator so any output stage (an [`HBridge`], a motor
/// controller over CAN, a simulation) can be driven.
///
/// [`HBridge`]: super::HBridge
pub struct Mechanism<A: Actuator> {
    actuator: A,

    /// Mechanism name for logging/debugging.
    name: String<32>,

    profile: SCurveProfile,
    controller: ExponentialPid,
    feedforward: Feedforward,

    soft_limits: Option<SoftLimits>,
    presets: FnvIndexMap<String<32>, f64, MAX_PRESETS>,

    /// Settle tolerance around the goal.
    tolerance: f64,

    /// Control period in seconds; every tick advances the profile by this much.
    period: f64,

    state: MechanismState,
    last_output: f64,
}

impl<A: Actuator> Mechanism<A> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        actuator: A,
        name: String<32>,
        profile: SCurveProfile,
        controller: ExponentialPid,
        feedforward: Feedforward,
        soft_limits: Option<SoftLimits>,
        presets: FnvIndexMap<String<32>, f64, MAX_PRESETS>,
        tolerance: f64,
    ) -> Self {
        let period = controller.period().value();
        Self {
            actuator,
            name,
            profile,
            controller,
            feedforward,
            soft_limits,
            presets,
            tolerance,
            period,
            state: MechanismState::Idle,
            last_output: 0.0,
        }
    }

    /// Get the mechanism name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Current run state.
    #[inline]
    pub fn state(&self) -> MechanismState {
        self.state
    }

    /// The reference trajectory generator.
    #[inline]
    pub fn profile(&self) -> &SCurveProfile {
        &self.profile
    }

    /// The tracking controller.
    #[inline]
    pub fn controller(&self) -> &ExponentialPid {
        &self.controller
    }

    /// Mutable access to the tracking controller, for live tuning.
    #[inline]
    pub fn controller_mut(&mut self) -> &mut ExponentialPid {
        &mut self.controller
    }

    /// The feedforward term.
    #[inline]
    pub fn feedforward(&self) -> &Feedforward {
        &self.feedforward
    }

    /// Replace the feedforward term.
    #[inline]
    pub fn set_feedforward(&mut self, feedforward: Feedforward) {
        self.feedforward = feedforward;
    }

    /// Soft position limits, if any.
    #[inline]
    pub fn soft_limits(&self) -> Option<&SoftLimits> {
        self.soft_limits.as_ref()
    }

    /// Settle tolerance around the goal.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Control period in seconds.
    #[inline]
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Output applied on the last tick.
    #[inline]
    pub fn last_output(&self) -> f64 {
        self.last_output
    }

    /// Current reference state.
    #[inline]
    pub fn reference(&self) -> KinematicState {
        self.profile.current_state()
    }

    /// Goal position of the current move.
    #[inline]
    pub fn goal(&self) -> f64 {
        self.profile.goal().position
    }

    /// Borrow the actuator.
    #[inline]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Mutably borrow the actuator.
    #[inline]
    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }

    /// Consume the mechanism and return the actuator.
    pub fn release(self) -> A {
        self.actuator
    }

    /// Start a move to an absolute position.
    ///
    /// Soft limits apply first: with `Reject` an out-of-range target is an
    /// error and nothing changes, with `Clamp` the nearest limit becomes the
    /// goal. The controller is reset so no integral carries over.
    ///
    /// # Errors
    ///
    /// `MotionError::NonFiniteTarget` or `MotionError::TargetOutOfRange`.
    pub fn move_to(&mut self, target: f64) -> Result<()> {
        if !target.is_finite() {
            return Err(Error::Motion(MotionError::NonFiniteTarget));
        }

        let goal = match &self.soft_limits {
            Some(limits) => match limits.apply(target) {
                Some(goal) => goal,
                None => {
                    warn!("target {} rejected by soft limits", target);
                    return Err(Error::Motion(MotionError::TargetOutOfRange {
                        target,
                        min: limits.min,
                        max: limits.max,
                    }));
                }
            },
            None => target,
        };

        self.controller.reset();
        self.profile.set_goal(goal);
        self.state = MechanismState::Moving;

        debug!("move_to goal={} duration={}", goal, self.profile.total_duration());
        Ok(())
    }

    /// Move by a relative amount from the current reference position.
    pub fn move_by(&mut self, delta: f64) -> Result<()> {
        let target = self.profile.current_state().position + delta;
        self.move_to(target)
    }

    /// Move to a named preset position.
    ///
    /// # Errors
    ///
    /// `ConfigError::PresetNotFound` if no preset has that name, otherwise as
    /// [`move_to`](Self::move_to).
    pub fn move_to_preset(&mut self, preset: &str) -> Result<()> {
        let target = self
            .presets
            .iter()
            .find(|(k, _)| k.as_str() == preset)
            .map(|(_, v)| *v)
            .ok_or_else(|| {
                Error::Config(ConfigError::PresetNotFound(
                    String::try_from(preset).unwrap_or_default(),
                ))
            })?;
        self.move_to(target)
    }

    /// List all preset names.
    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(|s| s.as_str())
    }

    /// Run one control tick and apply the output.
    ///
    /// Call exactly once per control period with the latest measurement.
    /// While idle the actuator is commanded to zero.
    pub fn tick(&mut self, measurement: f64) -> Result<f64> {
        if self.state == MechanismState::Idle {
            self.apply(0.0)?;
            return Ok(0.0);
        }

        let reference = self.profile.update(self.period);
        self.controller.set_setpoint(reference.position);

        let feedback = self.controller.calculate(measurement);
        let feedforward = self
            .feedforward
            .calculate(reference.velocity, reference.acceleration);
        let output = (feedback + feedforward).clamp(-1.0, 1.0);

        self.apply(output)?;

        if self.state == MechanismState::Moving && self.profile.is_finished() {
            debug!("{} reference finished", self.name.as_str());
            self.state = MechanismState::Holding;
        }

        Ok(output)
    }

    /// True once the reference is finished and `measurement` is within the
    /// tolerance of the goal.
    pub fn at_goal(&self, measurement: f64) -> bool {
        self.profile.is_finished()
            && libm::fabs(self.profile.goal().position - measurement) <= self.tolerance
    }

    /// Re-seat the reference at a known state, e.g. after homing, and go idle.
    pub fn reset(&mut self, position: f64, velocity: f64) {
        self.profile.reset(position, velocity);
        self.controller.reset();
        self.state = MechanismState::Idle;
    }

    /// Abandon the current move, zero the output and go idle.
    ///
    /// The reference stays where it was last sampled, at rest.
    pub fn stop(&mut self) -> Result<()> {
        let position = self.profile.current_state().position;
        self.reset(position, 0.0);
        self.apply(0.0)
    }

    fn apply(&mut self, output: f64) -> Result<()> {
        self.actuator.set_output(output)?;
        self.last_output = output;
        Ok(())
    }
}
