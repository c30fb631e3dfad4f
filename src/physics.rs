//! Physics resolver.
//!
//! Turns a [`FluxState`] into the electrical and mechanical quantities the
//! rest of the simulation consumes. These functions operate on plain values
//! so they can be called from the simulation controller, the Bevy systems and
//! standalone tests alike.

use log::warn;
use serde::Serialize;

use crate::geometry::{FieldRegion, FluxState, MovingObject, OverlapState};
use crate::numeric::{direction, snap_to_zero};
use crate::params::CircuitParameters;
use crate::{
    CURRENT_EPSILON, DEFAULT_MASS, DISPLAY_CHANGE_THRESHOLD, FLUX_SCALE, LENZ_VELOCITY_THRESHOLD,
    VELOCITY_EPSILON,
};

/// Smallest acceptable mass to avoid numerically unstable accelerations.
const MIN_MASS: f64 = 1e-12;

/// Computes acceleration from a force and optional mass.
///
/// Returns `None` if `mass` is non-positive or effectively zero (see
/// [`MIN_MASS`]). When `mass` is `None` the [`DEFAULT_MASS`] constant is
/// used.
///
/// # Examples
///
/// ```
/// use faraday::applied_acceleration;
/// let accel = applied_acceleration(-6.0, Some(3.0)).unwrap();
/// assert!((accel + 2.0).abs() < 1e-12);
/// assert!(applied_acceleration(1.0, Some(0.0)).is_none());
/// ```
#[must_use]
pub fn applied_acceleration(force: f64, mass: Option<f64>) -> Option<f64> {
    match mass {
        Some(m) if m > MIN_MASS => Some(force / m),
        Some(_) => None,
        None => Some(force / DEFAULT_MASS),
    }
}

/// Everything derived from one evaluation of the model.
///
/// Snapshots are recomputed every tick and never mutated; comparing two of
/// them only decides whether the display needs refreshing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhysicsSnapshot {
    /// Overlap classification the quantities were derived from.
    pub state: OverlapState,
    /// Signed flux-change rate, Wb/s.
    pub flux_change_rate: f64,
    /// Induced EMF, V. Numerically equal to the flux-change rate.
    pub emf: f64,
    /// Induced current, A. Always zero for the open conductor.
    pub current: f64,
    /// Magnitude of the opposing force, N.
    pub lenz_force: f64,
    /// Signed opposing force; always against the velocity.
    pub lenz_force_vector: f64,
    /// External driving force, N.
    pub external_force: f64,
    /// Sum of the external and opposing forces, N.
    pub net_force: f64,
    /// Resulting acceleration, m/s².
    pub acceleration: f64,
}

impl PhysicsSnapshot {
    /// Snapshot for an object considered at rest: only the external force acts.
    #[must_use]
    pub fn at_rest(state: OverlapState, external_force: f64, mass: f64) -> Self {
        let acceleration = acceleration_for(external_force, mass);
        Self {
            state,
            flux_change_rate: 0.0,
            emf: 0.0,
            current: 0.0,
            lenz_force: 0.0,
            lenz_force_vector: 0.0,
            external_force: snap_to_zero(external_force, VELOCITY_EPSILON),
            net_force: snap_to_zero(external_force, VELOCITY_EPSILON),
            acceleration: snap_to_zero(acceleration, VELOCITY_EPSILON),
        }
    }

    /// Whether `self` differs from `previous` enough to refresh the display.
    ///
    /// A change of overlap state always counts; otherwise the flux rate or
    /// the force must move by more than [`DISPLAY_CHANGE_THRESHOLD`].
    #[must_use]
    pub fn differs_noticeably(&self, previous: &Self) -> bool {
        self.state != previous.state
            || (self.flux_change_rate - previous.flux_change_rate).abs() > DISPLAY_CHANGE_THRESHOLD
            || (self.lenz_force - previous.lenz_force).abs() > DISPLAY_CHANGE_THRESHOLD
    }

    /// Whether an opposing force is currently acting.
    #[must_use]
    pub fn is_opposing(&self) -> bool {
        self.lenz_force > DISPLAY_CHANGE_THRESHOLD
    }
}

fn acceleration_for(force: f64, mass: f64) -> f64 {
    applied_acceleration(force, Some(mass)).unwrap_or_else(|| {
        warn!("mass {mass} is not usable; acceleration forced to zero");
        0.0
    })
}

/// Derives EMF, current, opposing force and acceleration from `flux`.
///
/// `velocity` must be the same velocity the flux state was evaluated with.
/// When `|velocity| ≤ VELOCITY_EPSILON` the object is treated as at rest and
/// every induced quantity is exactly zero; every other scalar is snapped to
/// zero below the same epsilon. `params.resistance` must be positive.
#[must_use]
pub fn resolve(
    flux: FluxState,
    params: &CircuitParameters,
    object: &MovingObject,
    velocity: f64,
    mass: f64,
) -> PhysicsSnapshot {
    let external_force = params.external_force;
    if velocity.abs() <= VELOCITY_EPSILON {
        return PhysicsSnapshot::at_rest(flux.state, external_force, mass);
    }

    let flux_change_rate = snap_to_zero(flux.flux_change_rate, VELOCITY_EPSILON);
    let emf = flux_change_rate;
    let current = if object.mode().is_closed_circuit() {
        snap_to_zero(emf / params.resistance, VELOCITY_EPSILON)
    } else {
        0.0
    };

    let lenz_force = if velocity.abs() > LENZ_VELOCITY_THRESHOLD && current.abs() > CURRENT_EPSILON
    {
        let magnitude = match *object {
            MovingObject::Coil { turns, area, .. } => {
                f64::from(turns) * params.field_strength * area * current.abs()
            }
            MovingObject::Conductor { .. } => params.field_strength * current.abs() * FLUX_SCALE,
        };
        snap_to_zero(magnitude, VELOCITY_EPSILON)
    } else {
        0.0
    };
    let lenz_force_vector = if lenz_force > 0.0 {
        -direction(velocity) * lenz_force
    } else {
        0.0
    };

    let net_force = snap_to_zero(external_force + lenz_force_vector, VELOCITY_EPSILON);
    PhysicsSnapshot {
        state: flux.state,
        flux_change_rate,
        emf,
        current,
        lenz_force,
        lenz_force_vector,
        external_force: snap_to_zero(external_force, VELOCITY_EPSILON),
        net_force,
        acceleration: snap_to_zero(acceleration_for(net_force, mass), VELOCITY_EPSILON),
    }
}

/// Potential difference across the two halves of an open conductor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PotentialSplit {
    /// EMF across the upper half, V.
    pub top: f64,
    /// EMF across the lower half, V.
    pub bottom: f64,
}

/// Charge separation along a conductor moving through the field.
///
/// Returns `None` for a coil. For a conductor the split is present whenever
/// any part of the bar overlaps the field, including when it sits fully
/// inside: no additional EMF is generated there, but the separated charge
/// persists while the bar keeps moving.
#[must_use]
pub fn potential_split(
    position: f64,
    object: &MovingObject,
    field: &FieldRegion,
    field_strength: f64,
    velocity: f64,
) -> Option<PotentialSplit> {
    let MovingObject::Conductor { height, .. } = *object else {
        return None;
    };
    let in_field = object.span_at(position).overlaps(field);
    let half = if in_field && velocity.abs() > VELOCITY_EPSILON {
        snap_to_zero(
            field_strength * velocity * (height / 2.0) * FLUX_SCALE,
            VELOCITY_EPSILON,
        )
    } else {
        0.0
    };
    Some(PotentialSplit {
        top: half,
        bottom: half,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::evaluate;
    use crate::mode::ObjectMode;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn params() -> CircuitParameters {
        CircuitParameters {
            field_strength: 1.0,
            turns: 10,
            area: 1.0,
            resistance: 5.0,
            velocity: 2.0,
            external_force: 0.0,
        }
    }

    fn snapshot_at(
        position: f64,
        mode: ObjectMode,
        params: &CircuitParameters,
        velocity: f64,
    ) -> PhysicsSnapshot {
        let field = FieldRegion::default();
        let object = MovingObject::for_mode(mode, params, &field);
        let flux = evaluate(position, &object, &field, params.field_strength, velocity);
        resolve(flux, params, &object, velocity, DEFAULT_MASS)
    }

    #[rstest]
    fn coil_entering_scenario(params: CircuitParameters) {
        let snapshot = snapshot_at(500.0, ObjectMode::Coil, &params, 2.0);
        assert_eq!(snapshot.state, OverlapState::Entering);
        assert_relative_eq!(snapshot.flux_change_rate, 2.0);
        assert_relative_eq!(snapshot.emf, 2.0);
        assert_relative_eq!(snapshot.current, 0.4);
        assert_relative_eq!(snapshot.lenz_force, 4.0, epsilon = 1e-12);
        assert_relative_eq!(snapshot.lenz_force_vector, -4.0, epsilon = 1e-12);
        assert_relative_eq!(snapshot.net_force, -4.0, epsilon = 1e-12);
        assert_relative_eq!(snapshot.acceleration, -4.0, epsilon = 1e-12);
    }

    #[rstest]
    fn lenz_force_opposes_negative_velocity(params: CircuitParameters) {
        let snapshot = snapshot_at(720.0, ObjectMode::Coil, &params, -2.0);
        assert_eq!(snapshot.state, OverlapState::Exiting);
        assert!(snapshot.lenz_force > 0.0);
        assert!(snapshot.lenz_force_vector > 0.0);
    }

    #[rstest]
    #[case(0.0)]
    #[case(VELOCITY_EPSILON)]
    #[case(-VELOCITY_EPSILON / 2.0)]
    fn strict_zero_below_velocity_epsilon(params: CircuitParameters, #[case] velocity: f64) {
        let driven = CircuitParameters {
            external_force: 3.0,
            ..params
        };
        let snapshot = snapshot_at(500.0, ObjectMode::Coil, &driven, velocity);
        assert_eq!(snapshot.flux_change_rate, 0.0);
        assert_eq!(snapshot.emf, 0.0);
        assert_eq!(snapshot.current, 0.0);
        assert_eq!(snapshot.lenz_force, 0.0);
        assert_eq!(snapshot.net_force, 3.0);
        assert_eq!(snapshot.acceleration, 3.0 / DEFAULT_MASS);
    }

    #[rstest]
    fn slow_motion_produces_no_lenz_force(params: CircuitParameters) {
        let snapshot = snapshot_at(500.0, ObjectMode::Coil, &params, 0.005);
        assert!(snapshot.emf > 0.0);
        assert_eq!(snapshot.lenz_force, 0.0);
    }

    #[rstest]
    fn conductor_is_an_open_circuit(params: CircuitParameters) {
        for position in [400.0, 495.0, 610.0, 720.0, 900.0] {
            let snapshot = snapshot_at(position, ObjectMode::Conductor, &params, 4.0);
            assert_eq!(snapshot.current, 0.0);
            assert_eq!(snapshot.lenz_force, 0.0);
            assert_eq!(snapshot.net_force, params.external_force);
        }
    }

    #[rstest]
    fn external_force_drives_acceleration(params: CircuitParameters) {
        let driven = CircuitParameters {
            external_force: 10.0,
            ..params
        };
        let snapshot = snapshot_at(500.0, ObjectMode::Coil, &driven, 2.0);
        assert_relative_eq!(snapshot.net_force, 6.0, epsilon = 1e-12);
        assert_relative_eq!(snapshot.acceleration, 6.0, epsilon = 1e-12);
    }

    #[rstest]
    fn resolving_twice_is_bit_identical(params: CircuitParameters) {
        let first = snapshot_at(505.5, ObjectMode::Coil, &params, 1.7);
        let second = snapshot_at(505.5, ObjectMode::Coil, &params, 1.7);
        assert_eq!(first, second);
        assert_eq!(first.lenz_force.to_bits(), second.lenz_force.to_bits());
    }

    #[rstest]
    fn conductor_inside_keeps_potential_split(params: CircuitParameters) {
        let field = FieldRegion::default();
        let object = MovingObject::for_mode(ObjectMode::Conductor, &params, &field);
        let split = potential_split(610.0, &object, &field, 1.0, 2.0).expect("conductor split");
        assert_relative_eq!(split.top, 1.0 * 2.0 * 110.0 * FLUX_SCALE);
        assert_relative_eq!(split.bottom, split.top);
    }

    #[rstest]
    fn coil_has_no_potential_split(params: CircuitParameters) {
        let field = FieldRegion::default();
        let object = MovingObject::for_mode(ObjectMode::Coil, &params, &field);
        assert_eq!(potential_split(610.0, &object, &field, 1.0, 2.0), None);
    }

    #[rstest]
    fn noticeable_change_detection(params: CircuitParameters) {
        let base = snapshot_at(500.0, ObjectMode::Coil, &params, 2.0);
        let nudged = PhysicsSnapshot {
            flux_change_rate: base.flux_change_rate + DISPLAY_CHANGE_THRESHOLD / 2.0,
            ..base
        };
        assert!(!nudged.differs_noticeably(&base));
        let moved = PhysicsSnapshot {
            state: OverlapState::Inside,
            ..base
        };
        assert!(moved.differs_noticeably(&base));
    }
}
