//! Velocity and position integration for autonomous motion.
//!
//! In manual mode the velocity comes straight from the user control and the
//! integrator does nothing. In autonomous mode the resolver's acceleration is
//! integrated with a semi-implicit Euler step, tiny velocities come to rest,
//! and the object stops dead when it reaches either position bound.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::params::{require_finite, ParameterError};
use crate::{ASSUMED_FRAME_TIME, MAX_POSITION, MIN_POSITION, POSITION_SCALE, REST_VELOCITY};

/// Hard limits on the object's centre position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionBounds {
    /// Lowest reachable position.
    pub min: f64,
    /// Highest reachable position.
    pub max: f64,
}

impl Default for PositionBounds {
    fn default() -> Self {
        Self {
            min: MIN_POSITION,
            max: MAX_POSITION,
        }
    }
}

impl PositionBounds {
    /// Checks the bounds are finite and ordered.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NonFinite`] or
    /// [`ParameterError::InvertedBounds`].
    pub fn validate(&self) -> Result<(), ParameterError> {
        require_finite("bounds.min", self.min)?;
        require_finite("bounds.max", self.max)?;
        if self.min > self.max {
            return Err(ParameterError::InvertedBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Clamps `position` into the bounds.
    #[must_use]
    pub fn clamp(&self, position: f64) -> f64 {
        position.clamp(self.min, self.max)
    }
}

/// Result of a single integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// New centre position.
    pub position: f64,
    /// New velocity.
    pub velocity: f64,
    /// Whether the step ended on a bound it would otherwise have passed.
    pub collided: bool,
}

/// Advances `velocity` and `position` by `dt` seconds under `acceleration`.
///
/// Velocities whose magnitude falls under [`REST_VELOCITY`] become zero and
/// velocities never turn negative. Positions move by
/// `velocity · dt · POSITION_SCALE`. If the position has to be clamped onto a
/// bound the velocity becomes exactly zero.
///
/// # Examples
/// ```
/// use faraday::kinematics::{integrate, PositionBounds};
/// let motion = integrate(100.0, 1.0, 0.0, 0.5, &PositionBounds::default());
/// assert!((motion.position - 130.0).abs() < 1e-9);
/// assert!(!motion.collided);
/// ```
#[expect(
    clippy::float_cmp,
    reason = "Collision means clamping landed exactly on a bound."
)]
#[must_use]
pub fn integrate(
    position: f64,
    velocity: f64,
    acceleration: f64,
    dt: f64,
    bounds: &PositionBounds,
) -> Motion {
    let accelerated = velocity + acceleration * dt;
    let settled = if accelerated.abs() < REST_VELOCITY {
        0.0
    } else {
        accelerated.max(0.0)
    };
    let travelled = position + settled * dt * POSITION_SCALE;
    let clamped = bounds.clamp(travelled);
    let collided = clamped != travelled && (clamped == bounds.min || clamped == bounds.max);
    Motion {
        position: clamped,
        velocity: if collided { 0.0 } else { settled },
        collided,
    }
}

/// Velocity carried between ticks and the motion mode it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct KinematicState {
    /// Current signed velocity, m/s.
    pub velocity: f64,
    /// Acceleration resolved on the last tick, m/s².
    pub acceleration: f64,
    /// Whether the position evolves from integrated velocity.
    pub autonomous: bool,
}

impl KinematicState {
    /// Takes the velocity from the user control unless motion is autonomous.
    pub fn set_manual_velocity(&mut self, velocity: f64) {
        if !self.autonomous {
            self.velocity = velocity;
        }
    }

    /// Starts autonomous motion from the current velocity.
    pub fn start(&mut self) {
        self.autonomous = true;
    }

    /// Stops autonomous motion, keeping the current velocity.
    pub fn stop(&mut self) {
        self.autonomous = false;
        self.acceleration = 0.0;
    }

    /// Brings the object to rest and leaves autonomous mode.
    pub fn halt(&mut self) {
        self.velocity = 0.0;
        self.acceleration = 0.0;
        self.autonomous = false;
    }

    /// Integrates one step when autonomous, returning the new position.
    ///
    /// A collision with a bound halts the motion episode.
    pub fn advance(
        &mut self,
        position: f64,
        acceleration: f64,
        dt: f64,
        bounds: &PositionBounds,
    ) -> f64 {
        if !self.autonomous {
            return position;
        }
        self.acceleration = acceleration;
        let motion = integrate(position, self.velocity, acceleration, dt, bounds);
        if motion.collided {
            debug!("object stopped at bound {}", motion.position);
            self.halt();
        } else {
            self.velocity = motion.velocity;
        }
        motion.position
    }
}

/// Pointer-drag tracking.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    last_pointer: Option<f64>,
}

impl DragState {
    /// Starts a drag at pointer position `pointer`.
    pub fn begin(&mut self, pointer: f64) {
        self.last_pointer = Some(pointer);
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.last_pointer.is_some()
    }

    /// Moves the pointer and returns the delta since the previous event.
    ///
    /// Returns `None` when no drag is in progress.
    pub fn follow(&mut self, pointer: f64) -> Option<f64> {
        let previous = self.last_pointer?;
        self.last_pointer = Some(pointer);
        Some(pointer - previous)
    }

    /// Ends the drag.
    pub fn end(&mut self) {
        self.last_pointer = None;
    }
}

/// Velocity implied by a pointer delta over one assumed frame.
///
/// Pointer events carry no timing, so this is an estimate, not a
/// measurement.
#[must_use]
pub fn drag_velocity_estimate(delta: f64) -> f64 {
    delta / POSITION_SCALE / ASSUMED_FRAME_TIME
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::coasting(100.0, 1.0, 0.0, 0.5, 130.0, 1.0)]
    #[case::accelerating(100.0, 0.0, 2.0, 0.5, 130.0, 1.0)]
    #[case::settles_to_rest(100.0, 5e-4, 0.0, 0.1, 100.0, 0.0)]
    #[case::never_reverses(100.0, 0.5, -10.0, 0.1, 100.0, 0.0)]
    fn integration_cases(
        #[case] position: f64,
        #[case] velocity: f64,
        #[case] acceleration: f64,
        #[case] dt: f64,
        #[case] expected_position: f64,
        #[case] expected_velocity: f64,
    ) {
        let motion = integrate(
            position,
            velocity,
            acceleration,
            dt,
            &PositionBounds::default(),
        );
        assert_relative_eq!(motion.position, expected_position, epsilon = 1e-9);
        assert_relative_eq!(motion.velocity, expected_velocity, epsilon = 1e-12);
        assert!(!motion.collided);
    }

    #[rstest]
    fn reaching_max_bound_stops_motion() {
        let bounds = PositionBounds::default();
        let motion = integrate(990.0, 10.0, 0.0, 1.0, &bounds);
        assert!(motion.collided);
        assert_eq!(motion.position, bounds.max);
        assert_eq!(motion.velocity, 0.0);
    }

    #[rstest]
    fn collision_leaves_autonomous_mode() {
        let bounds = PositionBounds::default();
        let mut state = KinematicState {
            velocity: 10.0,
            acceleration: 0.0,
            autonomous: true,
        };
        let position = state.advance(995.0, 0.0, 0.5, &bounds);
        assert_eq!(position, bounds.max);
        assert_eq!(state.velocity, 0.0);
        assert!(!state.autonomous);
    }

    #[rstest]
    fn manual_mode_is_inert() {
        let mut state = KinematicState {
            velocity: 3.0,
            ..KinematicState::default()
        };
        let position = state.advance(200.0, 50.0, 1.0, &PositionBounds::default());
        assert_eq!(position, 200.0);
        assert_eq!(state.velocity, 3.0);
    }

    #[rstest]
    fn manual_velocity_ignored_while_autonomous() {
        let mut state = KinematicState::default();
        state.set_manual_velocity(2.0);
        state.start();
        state.set_manual_velocity(7.0);
        assert_eq!(state.velocity, 2.0);
    }

    #[rstest]
    fn inverted_bounds_are_rejected() {
        let bounds = PositionBounds {
            min: 10.0,
            max: 5.0,
        };
        assert_eq!(
            bounds.validate(),
            Err(ParameterError::InvertedBounds {
                min: 10.0,
                max: 5.0
            })
        );
    }

    #[rstest]
    fn drag_reports_deltas_only_while_active() {
        let mut drag = DragState::default();
        assert_eq!(drag.follow(10.0), None);
        drag.begin(10.0);
        assert_eq!(drag.follow(14.0), Some(4.0));
        assert_eq!(drag.follow(11.0), Some(-3.0));
        drag.end();
        assert!(!drag.is_active());
    }

    #[rstest]
    fn drag_estimate_assumes_one_frame() {
        assert_relative_eq!(drag_velocity_estimate(1.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(drag_velocity_estimate(-3.0), -3.0, epsilon = 1e-12);
    }
}
