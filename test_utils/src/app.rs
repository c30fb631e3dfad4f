//! Headless Bevy app hosting the simulation plugin.

use std::time::Duration;

use bevy::prelude::*;
use faraday::{InductionPlugin, SimulationConfig};

/// Creates an app with [`InductionPlugin`] and no real-time clock.
///
/// Frames only see time passing through [`step`].
#[must_use]
pub fn headless_app(config: SimulationConfig) -> App {
    let mut app = App::new();
    app.add_plugins(InductionPlugin::new(config));
    app
}

/// Advances the app clock by `seconds` and runs one frame.
pub fn step(app: &mut App, seconds: f64) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f64(seconds));
    app.update();
}
