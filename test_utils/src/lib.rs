//! Utility helpers for tests.
//!
//! Builders for simulations parked at chosen positions, a recording
//! [`DisplaySink`](faraday::DisplaySink), and a headless Bevy app driven by a
//! manually advanced clock.

pub mod app;
pub mod physics;
pub mod sink;

pub use app::{headless_app, step};
pub use physics::{conductor_at, scenario_params, simulation_at};
pub use sink::RecordingSink;
