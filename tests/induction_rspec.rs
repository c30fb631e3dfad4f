//! Behaviour-driven tests using rust-rspec.
//!
//! These tests walk through the reset and parked-conductor scenarios end to
//! end, from control input to the formatted readout.

use faraday::{ObjectMode, OverlapState, Simulation, INITIAL_POSITION};
use test_utils::{conductor_at, scenario_params, simulation_at, RecordingSink};

#[derive(Clone, Debug)]
struct Bench {
    simulation: Simulation,
    sink: RecordingSink,
}

impl Bench {
    fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            sink: RecordingSink::default(),
        }
    }

    fn run_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.simulation.tick(1.0 / 60.0);
            self.simulation.publish(&mut self.sink);
        }
    }
}

impl Default for Bench {
    fn default() -> Self {
        Self::new(simulation_at(
            INITIAL_POSITION,
            ObjectMode::Coil,
            scenario_params(),
        ))
    }
}

#[test]
fn reset_returns_to_rest() {
    rspec::run(&rspec::given(
        "a coil that has been moving on its own",
        Bench::default(),
        |ctx| {
            ctx.before_each(|bench| {
                bench.simulation.start_motion();
                bench.run_frames(240);
            });
            ctx.then("it has left its starting position", |bench| {
                assert!(bench.simulation.position() > INITIAL_POSITION);
                assert!(!bench.simulation.history().is_empty());
            });
            ctx.when("the user resets", |ctx| {
                ctx.before_each(|bench| {
                    bench.simulation.reset();
                    bench.simulation.publish(&mut bench.sink);
                });
                ctx.then("the coil is parked at its start, at rest", |bench| {
                    assert_eq!(bench.simulation.position(), INITIAL_POSITION);
                    assert_eq!(bench.simulation.velocity(), 0.0);
                    assert!(!bench.simulation.is_autonomous());
                });
                ctx.then("every derived quantity reads zero", |bench| {
                    let readout = bench.sink.last().expect("reset publishes");
                    assert_eq!(readout.status, OverlapState::Outside);
                    assert_eq!(readout.flux_rate, "0.000 Wb/s");
                    assert_eq!(readout.emf, "0.000 V");
                    assert_eq!(readout.current.as_deref(), Some("0.0000 A"));
                    assert_eq!(readout.force, "0.000 N");
                    assert!(!readout.active);
                });
                ctx.then("the chart is emptied", |bench| {
                    assert!(bench.simulation.history().is_empty());
                    let last_plot = bench.sink.plots.last().expect("reset redraws chart");
                    assert!(last_plot.is_empty());
                });
            });
        },
    ));
}

#[test]
fn conductor_inside_field_keeps_its_charge_split() {
    rspec::run(&rspec::given(
        "a conductor parked fully inside the field",
        Bench::new(conductor_at(610.0, 2.0)),
        |ctx| {
            ctx.when("the display refreshes", |ctx| {
                ctx.before_each(|bench| {
                    bench.simulation.tick(1.0 / 60.0);
                    bench.simulation.publish(&mut bench.sink);
                });
                ctx.then("no flux change or force is reported", |bench| {
                    let snapshot = bench.simulation.snapshot();
                    assert_eq!(snapshot.state, OverlapState::Inside);
                    assert_eq!(snapshot.flux_change_rate, 0.0);
                    assert_eq!(snapshot.emf, 0.0);
                    assert_eq!(snapshot.current, 0.0);
                    assert_eq!(snapshot.lenz_force, 0.0);
                });
                ctx.then("the current readout is hidden", |bench| {
                    let readout = bench.sink.last().expect("first frame publishes");
                    assert_eq!(readout.object, ObjectMode::Conductor);
                    assert_eq!(readout.current, None);
                });
                ctx.then("both halves show the motional EMF", |bench| {
                    let readout = bench.sink.last().expect("first frame publishes");
                    let split = readout
                        .potential_split
                        .as_ref()
                        .expect("conductor shows split");
                    assert_eq!(split.top, "22.000 V");
                    assert_eq!(split.bottom, "22.000 V");
                });
            });
        },
    ));
}
