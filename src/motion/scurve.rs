//! Jerk-limited S-curve trajectory generator.
//!
//! [`SCurveProfile`] turns a goal position into a reference
//! position/velocity/acceleration sampled once per control tick. Every
//! `set_goal` replans from the last sampled state; the plan itself is a pure
//! function of the start position, the goal and the limits.

use crate::config::KinematicLimits;
use crate::error::Result;

use super::plan::{MotionPhase, ProfilePlan};
use super::state::KinematicState;

/// Direction of the planned move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Toward increasing position.
    #[default]
    Forward,
    /// Toward decreasing position.
    Reverse,
}

impl Direction {
    /// Direction of a signed displacement (zero counts as forward).
    #[inline]
    pub fn from_displacement(delta: f64) -> Self {
        if delta < 0.0 {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }
}

/// Seven-phase jerk-limited trajectory generator for one axis.
#[derive(Debug, Clone)]
pub struct SCurveProfile {
    limits: KinematicLimits,
    current: KinematicState,
    initial: KinematicState,
    goal: KinematicState,
    plan: ProfilePlan,
    direction: Direction,
    elapsed: f64,
}

impl SCurveProfile {
    /// Create a profile at rest at position zero.
    pub fn new(limits: KinematicLimits) -> Self {
        Self {
            limits,
            current: KinematicState::default(),
            initial: KinematicState::default(),
            goal: KinematicState::default(),
            plan: ProfilePlan::default(),
            direction: Direction::Forward,
            elapsed: 0.0,
        }
    }

    /// Create a profile from raw limits.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any limit is non-positive or not finite.
    pub fn try_new(max_velocity: f64, max_acceleration: f64, max_jerk: f64) -> Result<Self> {
        let limits = KinematicLimits::new(max_velocity, max_acceleration, max_jerk)?;
        Ok(Self::new(limits))
    }

    /// Re-seat the profile at a known state and drop the current plan.
    ///
    /// Use when the mechanism's actual state is known to differ from the
    /// profile's, e.g. after homing.
    pub fn reset(&mut self, position: f64, velocity: f64) {
        self.current = KinematicState::new(position, velocity, 0.0);
        self.initial = self.current;
        self.goal = KinematicState::at_rest(position);
        self.plan = ProfilePlan::default();
        self.direction = Direction::Forward;
        self.elapsed = 0.0;
    }

    /// Plan a move from the current state to `target`.
    ///
    /// Discards any plan in progress. The move starts from the last sampled
    /// position; see the crate docs for how a nonzero starting velocity is
    /// treated.
    pub fn set_goal(&mut self, target: f64) {
        self.goal = KinematicState::at_rest(target);
        self.initial = self.current;
        self.elapsed = 0.0;

        let delta = target - self.initial.position;
        self.direction = Direction::from_displacement(delta);
        self.plan = ProfilePlan::new(&self.limits, libm::fabs(delta));

        debug!(
            "set_goal target={} from={} duration={}",
            target,
            self.initial.position,
            self.plan.total_duration()
        );
    }

    /// Advance by `dt` seconds and return the new reference state.
    ///
    /// Call exactly once per control tick; each call moves time forward.
    pub fn update(&mut self, dt: f64) -> KinematicState {
        self.elapsed += dt;
        self.current = self.sample(self.elapsed);
        self.current
    }

    /// Evaluate the plan `t` seconds after the last `set_goal` without
    /// advancing the profile.
    pub fn sample(&self, t: f64) -> KinematicState {
        let magnitude = self.plan.sample(t);
        let signed = match self.direction {
            Direction::Forward => magnitude,
            Direction::Reverse => -magnitude,
        };
        signed.offset(self.initial.position)
    }

    /// True once the elapsed time covers the whole plan.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.plan.total_duration()
    }

    /// Last computed reference state.
    #[inline]
    pub fn current_state(&self) -> KinematicState {
        self.current
    }

    /// State captured when the current plan was made.
    #[inline]
    pub fn initial_state(&self) -> KinematicState {
        self.initial
    }

    /// Goal state of the current plan.
    #[inline]
    pub fn goal(&self) -> KinematicState {
        self.goal
    }

    /// The current plan.
    #[inline]
    pub fn plan(&self) -> &ProfilePlan {
        &self.plan
    }

    /// Direction of the current plan.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Kinematic limits this profile plans with.
    #[inline]
    pub fn limits(&self) -> &KinematicLimits {
        &self.limits
    }

    /// Seconds since the last `set_goal` or `reset`.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Total planned duration.
    #[inline]
    pub fn total_duration(&self) -> f64 {
        self.plan.total_duration()
    }

    /// Time left in the plan, zero once finished.
    #[inline]
    pub fn remaining(&self) -> f64 {
        (self.plan.total_duration() - self.elapsed).max(0.0)
    }

    /// Phase the profile is currently in.
    #[inline]
    pub fn phase(&self) -> MotionPhase {
        self.plan.phase_at(self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: f64 = 0.020;

    fn profile() -> SCurveProfile {
        SCurveProfile::try_new(2.0, 4.0, 20.0).unwrap()
    }

    #[test]
    fn test_unplanned_profile_is_finished() {
        let mut p = profile();
        assert!(p.is_finished());
        assert_eq!(p.update(TICK), KinematicState::default());
        assert_eq!(p.phase(), MotionPhase::Complete);
    }

    #[test]
    fn test_zero_displacement_finishes_immediately() {
        let mut p = profile();
        p.reset(1.5, 0.0);
        p.set_goal(1.5);
        assert!(p.is_finished());
        assert_eq!(p.update(TICK).position, 1.5);
    }

    #[test]
    fn test_try_new_rejects_bad_limits() {
        assert!(SCurveProfile::try_new(2.0, 0.0, 20.0).is_err());
    }

    #[test]
    fn test_reverse_move_mirrors_forward() {
        let mut fwd = profile();
        let mut rev = profile();
        fwd.set_goal(1.0);
        rev.set_goal(-1.0);

        assert_eq!(fwd.plan().durations(), rev.plan().durations());
        assert_eq!(rev.direction(), Direction::Reverse);

        while !fwd.is_finished() {
            let f = fwd.update(TICK);
            let r = rev.update(TICK);
            assert_eq!(f, -r);
        }
        assert!(rev.is_finished());
        assert_eq!(rev.current_state().position, -1.0);
    }

    #[test]
    fn test_goal_offset_from_initial_position() {
        let mut p = profile();
        p.reset(10.0, 0.0);
        p.set_goal(9.0);
        let mid = p.sample(p.total_duration() / 2.0);
        assert!((mid.position - 9.5).abs() < 1e-9);
        assert!(mid.velocity < 0.0);
    }

    #[test]
    fn test_update_accumulates_time() {
        let mut p = profile();
        p.set_goal(3.0);
        p.update(TICK);
        p.update(TICK);
        assert!((p.elapsed() - 2.0 * TICK).abs() < 1e-12);
        assert!((p.remaining() - (p.total_duration() - 2.0 * TICK)).abs() < 1e-12);
    }

    #[test]
    fn test_reset_clears_plan() {
        let mut p = profile();
        p.set_goal(3.0);
        p.update(TICK);
        p.reset(0.5, 0.25);

        assert!(p.is_finished());
        assert_eq!(p.elapsed(), 0.0);
        assert_eq!(p.current_state(), KinematicState::new(0.5, 0.25, 0.0));
        assert_eq!(p.plan().durations(), [0.0; 7]);
    }

    #[test]
    fn test_retarget_mid_move_starts_from_current_position() {
        let mut p = profile();
        p.set_goal(3.0);
        for _ in 0..30 {
            p.update(TICK);
        }
        let before = p.current_state();
        assert!(before.velocity > 0.0);

        // Reverse direction while still moving forward
        p.set_goal(0.0);
        assert_eq!(p.initial_state(), before);
        assert_eq!(p.direction(), Direction::Reverse);

        let next = p.update(TICK);
        assert!((next.position - before.position).abs() < 1e-3);

        while !p.is_finished() {
            p.update(TICK);
        }
        assert_eq!(p.current_state(), KinematicState::at_rest(0.0));
    }
}
