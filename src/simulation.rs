//! Simulation controller.
//!
//! [`Simulation`] owns every piece of mutable state: object position,
//! velocity, mode, and chart history. Hosts call [`Simulation::tick`] once per
//! frame and the control methods in response to discrete UI events; all of
//! them run to completion on the caller's thread. Nothing here depends on a
//! particular clock or scheduler.

use std::time::Duration;

use log::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::display::{DisplaySink, Readout, ReadoutGate};
use crate::geometry::{evaluate, FieldRegion, FluxState, MovingObject, OverlapState};
use crate::history::{HistoryBuffer, HistorySample};
use crate::kinematics::{drag_velocity_estimate, DragState, KinematicState, PositionBounds};
use crate::mode::ObjectMode;
use crate::params::{CircuitParameters, ParameterError};
use crate::physics::{potential_split, resolve, PhysicsSnapshot, PotentialSplit};
use crate::throttle::RefreshThrottle;

/// The complete, explicitly owned simulation state.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    params: CircuitParameters,
    mode: ObjectMode,
    position: f64,
    kinematics: KinematicState,
    drag: DragState,
    history: HistoryBuffer,
    history_dirty: bool,
    gate: ReadoutGate,
    throttle: RefreshThrottle,
    clock: Duration,
    last_state: OverlapState,
}

impl Simulation {
    /// Builds a simulation from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if `config` fails validation.
    pub fn new(config: SimulationConfig) -> Result<Self, ParameterError> {
        config.validate()?;
        let history = HistoryBuffer::new(
            config.history_capacity,
            config.history_noise_threshold,
            config.initial_position,
        );
        let mut simulation = Self {
            params: config.params,
            mode: config.mode,
            position: config.initial_position,
            kinematics: KinematicState {
                velocity: config.params.velocity,
                ..KinematicState::default()
            },
            drag: DragState::default(),
            history,
            history_dirty: true,
            gate: ReadoutGate::default(),
            throttle: RefreshThrottle::new(Duration::from_millis(config.refresh_interval_ms)),
            clock: Duration::ZERO,
            last_state: OverlapState::Outside,
            config,
        };
        simulation.last_state = simulation.flux_state().state;
        info!(
            "simulation ready: {} at x = {}, state {}",
            simulation.mode, simulation.position, simulation.last_state
        );
        Ok(simulation)
    }

    /// Object centre position.
    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
    }

    /// Authoritative velocity used for every flux evaluation.
    #[must_use]
    pub const fn velocity(&self) -> f64 {
        self.kinematics.velocity
    }

    /// Velocity, acceleration and motion mode.
    #[must_use]
    pub const fn kinematics(&self) -> &KinematicState {
        &self.kinematics
    }

    /// Current object representation.
    #[must_use]
    pub const fn mode(&self) -> ObjectMode {
        self.mode
    }

    /// Current circuit parameters.
    #[must_use]
    pub const fn params(&self) -> &CircuitParameters {
        &self.params
    }

    /// The field rectangle.
    #[must_use]
    pub const fn field(&self) -> &FieldRegion {
        &self.config.field
    }

    /// Position limits.
    #[must_use]
    pub const fn bounds(&self) -> &PositionBounds {
        &self.config.bounds
    }

    /// Chart history.
    #[must_use]
    pub const fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Whether the position evolves from integrated velocity.
    #[must_use]
    pub const fn is_autonomous(&self) -> bool {
        self.kinematics.autonomous
    }

    /// Whether a pointer drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Simulation time accumulated by [`Simulation::tick`].
    #[must_use]
    pub const fn clock(&self) -> Duration {
        self.clock
    }

    /// The moving object with geometry derived from the current parameters.
    #[must_use]
    pub fn object(&self) -> MovingObject {
        MovingObject::for_mode(self.mode, &self.params, &self.config.field)
    }

    /// Overlap classification at the current position and velocity.
    #[must_use]
    pub fn flux_state(&self) -> FluxState {
        evaluate(
            self.position,
            &self.object(),
            &self.config.field,
            self.params.field_strength,
            self.kinematics.velocity,
        )
    }

    /// Evaluates the model without touching any state.
    #[must_use]
    pub fn snapshot(&self) -> PhysicsSnapshot {
        resolve(
            self.flux_state(),
            &self.params,
            &self.object(),
            self.kinematics.velocity,
            self.config.mass,
        )
    }

    /// Conductor charge separation, `None` in coil mode.
    #[must_use]
    pub fn potential_split(&self) -> Option<PotentialSplit> {
        potential_split(
            self.position,
            &self.object(),
            &self.config.field,
            self.params.field_strength,
            self.kinematics.velocity,
        )
    }

    /// Advances the simulation by `dt` seconds and returns the new snapshot.
    ///
    /// In autonomous mode the acceleration resolved at the current position
    /// is integrated first; the returned snapshot describes the position
    /// reached. Negative or non-finite steps are treated as zero; a step too
    /// long for the clock saturates it.
    pub fn tick(&mut self, dt: f64) -> PhysicsSnapshot {
        let step = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!("ignoring invalid time step {dt}");
            0.0
        };
        let elapsed = Duration::try_from_secs_f64(step).unwrap_or_else(|e| {
            warn!("time step {step} overflows the clock: {e}");
            Duration::MAX
        });
        self.clock = self.clock.saturating_add(elapsed);

        if self.kinematics.autonomous {
            let acceleration = self.snapshot().acceleration;
            self.position =
                self.kinematics
                    .advance(self.position, acceleration, step, &self.config.bounds);
            if !self.kinematics.autonomous {
                info!("motion stopped at bound x = {}", self.position);
            }
        }

        let snapshot = self.snapshot();
        self.kinematics.acceleration = snapshot.acceleration;
        self.observe(&snapshot);
        snapshot
    }

    fn observe(&mut self, snapshot: &PhysicsSnapshot) {
        if snapshot.state != self.last_state {
            debug!(
                "{} moved from {} to {} at x = {:.1}",
                self.mode, self.last_state, snapshot.state, self.position
            );
            self.last_state = snapshot.state;
        }
        if self.history.record(self.position, snapshot.lenz_force) {
            self.history_dirty = true;
        }
    }

    /// Returns the object to its initial position at rest with empty history.
    pub fn reset(&mut self) {
        self.position = self.config.initial_position;
        self.kinematics.halt();
        self.drag.end();
        self.history.clear(self.config.initial_position);
        self.history_dirty = true;
        self.gate.invalidate();
        self.throttle.reset();
        self.last_state = self.flux_state().state;
        info!("simulation reset to x = {}", self.position);
    }

    /// Switches between coil and conductor, keeping position, velocity and
    /// history. Returns the new mode.
    pub fn toggle_mode(&mut self) -> ObjectMode {
        self.mode = self.mode.toggled();
        self.last_state = self.flux_state().state;
        info!("switched to {} mode", self.mode);
        self.mode
    }

    /// Starts autonomous motion from the current velocity.
    pub fn start_motion(&mut self) {
        if self.drag.is_active() {
            debug!("ignoring motion start during drag");
            return;
        }
        self.kinematics.start();
        debug!("autonomous motion started at v = {}", self.kinematics.velocity);
    }

    /// Stops autonomous motion.
    pub fn stop_motion(&mut self) {
        self.kinematics.stop();
        debug!("autonomous motion stopped at x = {}", self.position);
    }

    /// Flips autonomous motion on or off; returns whether it is now on.
    pub fn toggle_motion(&mut self) -> bool {
        if self.kinematics.autonomous {
            self.stop_motion();
        } else {
            self.start_motion();
        }
        self.kinematics.autonomous
    }

    /// Grabs the object at pointer position `pointer`.
    ///
    /// The object comes to rest and autonomous motion ends.
    pub fn begin_drag(&mut self, pointer: f64) {
        self.kinematics.halt();
        self.drag.begin(pointer);
    }

    /// Moves a grabbed object along with the pointer.
    ///
    /// The velocity becomes an estimate from the pointer delta over one
    /// assumed frame. Does nothing when no drag is in progress.
    pub fn drag_to(&mut self, pointer: f64) {
        let Some(delta) = self.drag.follow(pointer) else {
            return;
        };
        self.kinematics.autonomous = false;
        self.position = self.config.bounds.clamp(self.position + delta);
        self.kinematics.velocity = drag_velocity_estimate(delta);
        let snapshot = self.snapshot();
        self.observe(&snapshot);
    }

    /// Releases the object, leaving it at rest.
    pub fn end_drag(&mut self) {
        if self.drag.is_active() {
            self.drag.end();
            self.kinematics.velocity = 0.0;
        }
    }

    /// Replaces the circuit parameters, clamping them into their domains.
    ///
    /// Outside autonomous motion the velocity follows the new user value.
    pub fn set_parameters(&mut self, params: CircuitParameters) {
        self.params = params.sanitised();
        self.kinematics.set_manual_velocity(self.params.velocity);
    }

    /// Sets the user-controlled velocity.
    pub fn set_velocity(&mut self, velocity: f64) {
        self.set_parameters(CircuitParameters {
            velocity,
            ..self.params
        });
    }

    /// Sets the external driving force.
    pub fn set_external_force(&mut self, external_force: f64) {
        self.set_parameters(CircuitParameters {
            external_force,
            ..self.params
        });
    }

    /// Pushes the current readout and chart to `sink` if they changed.
    ///
    /// Returns whether a readout was presented.
    pub fn publish<S: DisplaySink + ?Sized>(&mut self, sink: &mut S) -> bool {
        let snapshot = self.snapshot();
        let split = self.potential_split();
        self.throttle.settle(self.clock);
        let changed = self.gate.admit(&snapshot, self.mode, split);
        if changed {
            sink.present(&Readout::new(&snapshot, self.mode, split));
        }
        if self.history_dirty {
            let samples: Vec<HistorySample> = self.history.samples().copied().collect();
            sink.plot(&samples);
            self.history_dirty = false;
        }
        changed
    }

    /// Like [`Simulation::publish`], but at most once per refresh interval.
    ///
    /// Meant for bursts of parameter changes; a denied refresh is delivered
    /// by the next unthrottled publish.
    pub fn request_publish<S: DisplaySink + ?Sized>(&mut self, sink: &mut S) -> bool {
        if self.throttle.admit(self.clock) {
            self.publish(sink)
        } else {
            false
        }
    }

    /// Whether a throttled refresh is still owed.
    #[must_use]
    pub const fn refresh_pending(&self) -> bool {
        self.throttle.is_pending()
    }
}
