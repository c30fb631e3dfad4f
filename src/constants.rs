//! Simulation constants shared across the evaluator, resolver and integrator.
//!
//! Geometry values are expressed in canvas units, physical quantities in SI.
//! Most of these act as defaults; [`crate::config::SimulationConfig`] can
//! override the ones that describe the scene rather than the model.

/// Left edge of the magnetic-field rectangle.
pub const FIELD_X: f64 = 500.0;
/// Width of the magnetic-field rectangle.
pub const FIELD_WIDTH: f64 = 220.0;

/// Centre position the object starts from and returns to on reset.
pub const INITIAL_POSITION: f64 = 80.0;
/// Lowest reachable centre position.
pub const MIN_POSITION: f64 = 0.0;
/// Highest reachable centre position.
pub const MAX_POSITION: f64 = 1000.0;

/// Area multiplier applied before taking the square root for the coil width.
pub const COIL_AREA_SCALE: f64 = 1.5;
/// Canvas units per unit of `sqrt(area)`.
pub const COIL_WIDTH_PER_ROOT_AREA: f64 = 60.0;
/// Largest coil width as a fraction of the field width.
pub const COIL_MAX_FIELD_FRACTION: f64 = 0.9;
/// Fixed drawn height of the coil.
pub const COIL_HEIGHT: f64 = 120.0;
/// Fixed width of the straight conductor.
pub const CONDUCTOR_WIDTH: f64 = 25.0;
/// Fixed height of the straight conductor.
pub const CONDUCTOR_HEIGHT: f64 = 220.0;

/// Visualisation scale folded into every flux-rate formula.
pub const FLUX_SCALE: f64 = 0.1;

/// Velocity magnitude at or below which the strict-zero rule applies.
///
/// Also the snap threshold applied to every scalar leaving the resolver.
pub const VELOCITY_EPSILON: f64 = 1e-3;
/// Velocity magnitude the object must exceed before a Lenz force appears.
pub const LENZ_VELOCITY_THRESHOLD: f64 = 0.01;
/// Current magnitude the circuit must exceed before a Lenz force appears.
pub const CURRENT_EPSILON: f64 = 1e-4;
/// Integrated velocities below this magnitude come to rest.
pub const REST_VELOCITY: f64 = 1e-3;

/// Mass of the moving object in kilograms.
pub const DEFAULT_MASS: f64 = 1.0;
/// Canvas units travelled per metre.
pub const POSITION_SCALE: f64 = 60.0;
/// Frame time assumed when estimating drag velocity from pointer deltas.
pub const ASSUMED_FRAME_TIME: f64 = 1.0 / 60.0;

/// Smallest resistance accepted from the input boundary.
pub const MIN_RESISTANCE: f64 = 0.1;
/// Smallest coil area accepted from the input boundary.
pub const MIN_AREA: f64 = 0.01;

/// Number of `(position, force)` samples kept for the chart.
pub const HISTORY_CAPACITY: usize = 100;
/// Minimum movement before a new history sample is taken.
pub const HISTORY_NOISE_THRESHOLD: f64 = 0.5;
/// Smallest change in flux rate or force that warrants a display refresh.
pub const DISPLAY_CHANGE_THRESHOLD: f64 = 1e-3;
/// Minimum simulation time between two parameter-driven refreshes, in
/// milliseconds.
pub const REFRESH_INTERVAL_MS: u64 = 16;
