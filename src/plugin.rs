//! Bevy plugin hosting a [`Simulation`] inside an app.
//!
//! The plugin owns the simulation as a resource, advances it from the app's
//! [`Time`] once per frame and publishes readouts into [`ReadoutPanel`].
//! Discrete UI input arrives as [`ControlAction`] events.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{debug, error};
use thiserror::Error;

use crate::config::SimulationConfig;
use crate::display::{DisplaySink, Readout};
use crate::history::HistorySample;
use crate::params::CircuitParameters;
use crate::simulation::Simulation;

/// Resource wrapping the running simulation.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct SimulationState(pub Simulation);

/// Latest display output, for renderers to read each frame.
#[derive(Resource, Debug, Default, Clone)]
pub struct ReadoutPanel {
    /// Most recent readout, if any was published.
    pub readout: Option<Readout>,
    /// Chart samples, oldest first.
    pub chart: Vec<HistorySample>,
    /// Number of readouts presented so far.
    pub refreshes: u64,
}

impl DisplaySink for ReadoutPanel {
    fn present(&mut self, readout: &Readout) {
        self.readout = Some(readout.clone());
        self.refreshes += 1;
    }

    fn plot(&mut self, samples: &[HistorySample]) {
        self.chart.clear();
        self.chart.extend_from_slice(samples);
    }
}

/// Discrete user input applied to the simulation.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    /// Return to the initial position at rest.
    Reset,
    /// Switch between coil and conductor.
    ToggleMode,
    /// Begin autonomous motion.
    StartMotion,
    /// End autonomous motion.
    StopMotion,
    /// Flip autonomous motion.
    ToggleMotion,
    /// Grab the object at the given pointer position.
    DragStart(f64),
    /// Move the pointer during a drag.
    DragMove(f64),
    /// Release the object.
    DragEnd,
    /// Replace the circuit parameters from the UI controls.
    SetParameters(CircuitParameters),
}

/// Event raised when the plugin cannot build its simulation.
#[derive(Event, Debug, Clone, Error)]
#[error("simulation setup failed: {detail}")]
pub struct SimulationError {
    /// Description of the underlying error.
    pub detail: String,
}

impl SimulationError {
    /// Creates an error event from any displayable message.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn log_simulation_error(event: On<SimulationError>) {
    error!("{}", event.event());
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn apply_control_action(
    event: On<ControlAction>,
    mut state: ResMut<SimulationState>,
    mut panel: ResMut<ReadoutPanel>,
) {
    let action = *event.event();
    debug!("control action {action:?}");
    match action {
        ControlAction::Reset => state.reset(),
        ControlAction::ToggleMode => {
            state.toggle_mode();
        }
        ControlAction::StartMotion => state.start_motion(),
        ControlAction::StopMotion => state.stop_motion(),
        ControlAction::ToggleMotion => {
            state.toggle_motion();
        }
        ControlAction::DragStart(pointer) => state.begin_drag(pointer),
        ControlAction::DragMove(pointer) => state.drag_to(pointer),
        ControlAction::DragEnd => state.end_drag(),
        ControlAction::SetParameters(params) => {
            state.set_parameters(params);
            state.request_publish(&mut *panel);
            return;
        }
    }
    state.publish(&mut *panel);
}

/// Advances the simulation by the frame's elapsed time.
pub fn advance_simulation_system(time: Res<Time>, mut state: ResMut<SimulationState>) {
    state.tick(time.delta_secs_f64());
}

/// Pushes changed readouts into the [`ReadoutPanel`].
pub fn publish_readout_system(mut state: ResMut<SimulationState>, mut panel: ResMut<ReadoutPanel>) {
    state.publish(&mut *panel);
}

/// Bevy plugin installing the simulation resources, systems and observers.
#[derive(Default)]
pub struct InductionPlugin {
    /// Scene and initial parameters.
    pub config: SimulationConfig,
}

impl InductionPlugin {
    /// Creates the plugin for `config`.
    #[must_use]
    pub const fn new(config: SimulationConfig) -> Self {
        Self { config }
    }
}

impl Plugin for InductionPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_simulation_error);

        let simulation = match Simulation::new(self.config.clone()) {
            Ok(simulation) => simulation,
            Err(e) => {
                app.world_mut().trigger(SimulationError::new(e.to_string()));
                return;
            }
        };

        app.insert_resource(SimulationState(simulation));
        app.init_resource::<ReadoutPanel>();
        app.init_resource::<Time>();
        app.add_observer(apply_control_action);
        app.add_systems(
            Update,
            (advance_simulation_system, publish_readout_system).chain(),
        );
    }
}
