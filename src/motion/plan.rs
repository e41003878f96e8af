//! Seven-phase jerk-limited move planning.
//!
//! A symmetric S-curve rest-to-rest move is fully described by three
//! durations: the jerk ramp time `tj` (phases 1, 3, 5, 7), the constant
//! acceleration time `tv` (phases 2, 6) and the cruise time `tc` (phase 4).
//! Planning picks those from the kinematic limits and the unsigned distance;
//! sampling evaluates the closed-form polynomials of each phase.

use crate::config::KinematicLimits;

use super::state::KinematicState;

/// Which shape the planner selected for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanRegime {
    /// No motion planned (zero distance or never planned).
    #[default]
    Idle,
    /// Reaches max velocity and cruises.
    Cruise,
    /// Reaches max acceleration but not max velocity.
    NoCruise,
    /// Too short to reach max acceleration; pure jerk ramps.
    JerkOnly,
}

/// Phase of a seven-phase S-curve move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPhase {
    /// Phase 1: acceleration ramps up at +J.
    RampUpAcceleration,
    /// Phase 2: constant acceleration.
    ConstantAcceleration,
    /// Phase 3: acceleration ramps down at -J.
    RampDownAcceleration,
    /// Phase 4: constant velocity.
    Cruising,
    /// Phase 5: deceleration ramps up at -J.
    RampUpDeceleration,
    /// Phase 6: constant deceleration.
    ConstantDeceleration,
    /// Phase 7: deceleration ramps down at +J.
    RampDownDeceleration,
    /// Move complete, at rest on the goal.
    Complete,
}

impl MotionPhase {
    /// Sign of the jerk applied during this phase (unsigned move direction).
    pub fn jerk_sign(self) -> i8 {
        match self {
            MotionPhase::RampUpAcceleration | MotionPhase::RampDownDeceleration => 1,
            MotionPhase::RampDownAcceleration | MotionPhase::RampUpDeceleration => -1,
            _ => 0,
        }
    }
}

/// Boundary values carried from one phase into the next.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Knots {
    v1: f64,
    v2: f64,
    v3: f64,
    v5: f64,
    v6: f64,
    p1: f64,
    p2: f64,
    p3: f64,
    p4: f64,
    p5: f64,
    p6: f64,
}

/// Phase durations and boundary values of one planned move.
///
/// All quantities are unsigned; the caller applies the direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProfilePlan {
    tj: f64,
    tv: f64,
    tc: f64,
    jerk: f64,
    distance: f64,
    regime: PlanRegime,
    knots: Knots,
}

impl ProfilePlan {
    /// Plan a rest-to-rest move of unsigned length `distance`.
    ///
    /// Non-positive or NaN distances produce the idle plan.
    pub fn new(limits: &KinematicLimits, distance: f64) -> Self {
        if !(distance > 0.0) {
            return Self::default();
        }

        let s = distance;
        let j = limits.max_jerk();
        let v = limits.max_velocity();
        let a = limits.effective_acceleration();

        let mut tj = a / j;
        // Rounding can leave this a hair below zero when a = sqrt(v*j)
        let mut tv = ((v - a * tj) / a).max(0.0);
        let s_crit = v * (2.0 * tj + tv);

        let (tc, regime) = if s < s_crit {
            // Peak velocity a*(tj + tv) covers s = a*(2tj^2 + 3tj*tv + tv^2).
            let disc = 9.0 * tj * tj - 4.0 * (2.0 * tj * tj - s / a);
            let root = (-3.0 * tj + libm::sqrt(disc.max(0.0))) / 2.0;
            if disc >= 0.0 && root >= 0.0 {
                tv = root;
                (0.0, PlanRegime::NoCruise)
            } else {
                // Max acceleration unreachable: s = 2*j*tj^3
                tj = libm::cbrt(s / (2.0 * j));
                tv = 0.0;
                (0.0, PlanRegime::JerkOnly)
            }
        } else {
            ((s - s_crit) / v, PlanRegime::Cruise)
        };

        trace!(
            "planned s={} tj={} tv={} tc={} s_crit={}",
            s,
            tj,
            tv,
            tc,
            s_crit
        );

        Self::from_durations(tj, tv, tc, j, s, regime)
    }

    fn from_durations(tj: f64, tv: f64, tc: f64, j: f64, distance: f64, regime: PlanRegime) -> Self {
        let a = j * tj;
        let tj2 = tj * tj;
        let tj3 = tj2 * tj;

        let v1 = 0.5 * j * tj2;
        let v2 = v1 + a * tv;
        let v3 = v2 + a * tj - 0.5 * j * tj2;
        let v5 = v3 - 0.5 * j * tj2;
        let v6 = v5 - a * tv;

        let p1 = j * tj3 / 6.0;
        let p2 = p1 + v1 * tv + 0.5 * a * tv * tv;
        let p3 = p2 + v2 * tj + 0.5 * a * tj2 - j * tj3 / 6.0;
        let p4 = p3 + v3 * tc;
        let p5 = p4 + v3 * tj - j * tj3 / 6.0;
        let p6 = p5 + v5 * tv - 0.5 * a * tv * tv;

        Self {
            tj,
            tv,
            tc,
            jerk: j,
            distance,
            regime,
            knots: Knots {
                v1,
                v2,
                v3,
                v5,
                v6,
                p1,
                p2,
                p3,
                p4,
                p5,
                p6,
            },
        }
    }

    /// The seven phase durations `t1..t7`.
    pub fn durations(&self) -> [f64; 7] {
        [self.tj, self.tv, self.tj, self.tc, self.tj, self.tv, self.tj]
    }

    /// Cumulative phase end times `b1..b7`.
    pub fn boundaries(&self) -> [f64; 7] {
        let mut out = self.durations();
        for i in 1..out.len() {
            out[i] += out[i - 1];
        }
        out
    }

    /// Jerk ramp duration (phases 1, 3, 5, 7).
    #[inline]
    pub fn jerk_time(&self) -> f64 {
        self.tj
    }

    /// Constant acceleration duration (phases 2, 6).
    #[inline]
    pub fn constant_acceleration_time(&self) -> f64 {
        self.tv
    }

    /// Cruise duration (phase 4).
    #[inline]
    pub fn cruise_time(&self) -> f64 {
        self.tc
    }

    /// Total move duration.
    #[inline]
    pub fn total_duration(&self) -> f64 {
        4.0 * self.tj + 2.0 * self.tv + self.tc
    }

    /// Unsigned distance the plan covers.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Highest velocity reached, at the end of phase 3.
    #[inline]
    pub fn peak_velocity(&self) -> f64 {
        self.knots.v3
    }

    /// Highest acceleration reached, during phase 2.
    #[inline]
    pub fn peak_acceleration(&self) -> f64 {
        self.jerk * self.tj
    }

    /// Regime selected at planning time.
    #[inline]
    pub fn regime(&self) -> PlanRegime {
        self.regime
    }

    /// Phase the move is in `t` seconds after planning.
    pub fn phase_at(&self, t: f64) -> MotionPhase {
        if t >= self.total_duration() {
            return MotionPhase::Complete;
        }

        let [b1, b2, b3, b4, b5, b6, _] = self.boundaries();
        if t < b1 {
            MotionPhase::RampUpAcceleration
        } else if t < b2 {
            MotionPhase::ConstantAcceleration
        } else if t < b3 {
            MotionPhase::RampDownAcceleration
        } else if t < b4 {
            MotionPhase::Cruising
        } else if t < b5 {
            MotionPhase::RampUpDeceleration
        } else if t < b6 {
            MotionPhase::ConstantDeceleration
        } else {
            MotionPhase::RampDownDeceleration
        }
    }

    /// Unsigned state `t` seconds after planning, relative to the start.
    ///
    /// Negative times evaluate as the start of the move; times past the last
    /// boundary report rest at `distance`.
    pub fn sample(&self, t: f64) -> KinematicState {
        let t = t.max(0.0);
        let j = self.jerk;
        let a = j * self.tj;
        let k = &self.knots;
        let [b1, b2, b3, b4, b5, b6, b7] = self.boundaries();

        if t <= b1 {
            KinematicState::new(j * t * t * t / 6.0, 0.5 * j * t * t, j * t)
        } else if t <= b2 {
            let dt = t - b1;
            KinematicState::new(k.p1 + k.v1 * dt + 0.5 * a * dt * dt, k.v1 + a * dt, a)
        } else if t <= b3 {
            let dt = t - b2;
            KinematicState::new(
                k.p2 + k.v2 * dt + 0.5 * a * dt * dt - j * dt * dt * dt / 6.0,
                k.v2 + a * dt - 0.5 * j * dt * dt,
                a - j * dt,
            )
        } else if t <= b4 {
            let dt = t - b3;
            KinematicState::new(k.p3 + k.v3 * dt, k.v3, 0.0)
        } else if t <= b5 {
            let dt = t - b4;
            KinematicState::new(
                k.p4 + k.v3 * dt - j * dt * dt * dt / 6.0,
                k.v3 - 0.5 * j * dt * dt,
                -j * dt,
            )
        } else if t <= b6 {
            let dt = t - b5;
            KinematicState::new(k.p5 + k.v5 * dt - 0.5 * a * dt * dt, k.v5 - a * dt, -a)
        } else if t <= b7 {
            let dt = t - b6;
            KinematicState::new(
                k.p6 + k.v6 * dt - 0.5 * a * dt * dt + j * dt * dt * dt / 6.0,
                k.v6 - a * dt + 0.5 * j * dt * dt,
                -a + j * dt,
            )
        } else {
            KinematicState::at_rest(self.distance)
        }
    }
}
