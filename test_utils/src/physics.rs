//! Convenience constructors for simulations used in tests.

use faraday::{CircuitParameters, ObjectMode, Simulation, SimulationConfig};

/// Parameters of the worked example: B = 1 T, 10 turns, A = 1 m², R = 5 Ω,
/// moving at 2 m/s with no external force.
///
/// # Examples
/// ```
/// use test_utils::scenario_params;
/// assert_eq!(scenario_params().turns, 10);
/// ```
#[must_use]
pub fn scenario_params() -> CircuitParameters {
    CircuitParameters {
        field_strength: 1.0,
        turns: 10,
        area: 1.0,
        resistance: 5.0,
        velocity: 2.0,
        external_force: 0.0,
    }
}

/// Builds a simulation whose object starts at `position`.
///
/// # Panics
/// Panics if the resulting configuration is invalid.
#[must_use]
pub fn simulation_at(position: f64, mode: ObjectMode, params: CircuitParameters) -> Simulation {
    Simulation::new(SimulationConfig {
        initial_position: position,
        mode,
        params,
        ..SimulationConfig::default()
    })
    .expect("test configuration should be valid")
}

/// Shorthand for a conductor at `position` with `velocity`.
///
/// # Examples
/// ```
/// use test_utils::conductor_at;
/// let sim = conductor_at(610.0, 2.0);
/// assert_eq!(sim.position(), 610.0);
/// ```
#[must_use]
pub fn conductor_at(position: f64, velocity: f64) -> Simulation {
    simulation_at(
        position,
        ObjectMode::Conductor,
        CircuitParameters {
            velocity,
            ..scenario_params()
        },
    )
}
