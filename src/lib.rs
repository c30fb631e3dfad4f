#![cfg_attr(docsrs, feature(doc_cfg))]
//! Core of an electromagnetic-induction teaching simulation.
//!
//! A coil or an open conductor bar moves horizontally through a rectangular
//! magnetic field. Each frame the crate classifies the overlap, derives the
//! flux-change rate, EMF, current and opposing Lenz force, integrates motion
//! when the object moves on its own, and hands formatted readouts to a
//! [`DisplaySink`]. [`InductionPlugin`] hosts the whole thing in a Bevy app.
pub mod config;
pub mod constants;
pub mod display;
pub mod geometry;
pub mod history;
pub mod kinematics;
pub mod logging;
pub mod mode;
pub mod numeric;
pub mod params;
pub mod physics;
pub mod plugin;
pub mod simulation;
pub mod throttle;
pub use constants::*;

// Re-export commonly used items
pub use config::{ConfigError, SimulationConfig};
pub use display::{DisplaySink, Readout};
pub use geometry::{evaluate, FieldRegion, FluxState, MovingObject, OverlapState};
pub use history::{HistoryBuffer, HistorySample};
pub use kinematics::{integrate, KinematicState, PositionBounds};
pub use logging::init as init_logging;
pub use mode::ObjectMode;
pub use params::{CircuitParameters, ParameterError};
pub use physics::{applied_acceleration, potential_split, resolve, PhysicsSnapshot};
pub use plugin::{ControlAction, InductionPlugin, ReadoutPanel, SimulationError, SimulationState};
pub use simulation::Simulation;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use faraday::prelude::*;
    //! let mut simulation = Simulation::new(SimulationConfig::default()).unwrap();
    //! simulation.start_motion();
    //! let snapshot = simulation.tick(1.0 / 60.0);
    //! assert_eq!(snapshot.state, OverlapState::Outside);
    //! ```

    pub use crate::CircuitParameters;
    pub use crate::ControlAction;
    pub use crate::InductionPlugin;
    pub use crate::ObjectMode;
    pub use crate::OverlapState;
    pub use crate::PhysicsSnapshot;
    pub use crate::Simulation;
    pub use crate::SimulationConfig;
}
