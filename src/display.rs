//! Hand-off of physics results to the display layer.
//!
//! The core never draws. It formats a [`Readout`] from each snapshot and
//! pushes it to a [`DisplaySink`] only when something visible changed, along
//! with the chart history whenever a new sample was taken.

use serde::Serialize;

use crate::geometry::OverlapState;
use crate::history::HistorySample;
use crate::mode::ObjectMode;
use crate::physics::{PhysicsSnapshot, PotentialSplit};
use crate::DISPLAY_CHANGE_THRESHOLD;

/// Formats `value` with `decimals` places followed by `unit`.
///
/// # Examples
/// ```
/// use faraday::display::format_quantity;
/// assert_eq!(format_quantity(0.4, 4, "A"), "0.4000 A");
/// ```
#[must_use]
pub fn format_quantity(value: f64, decimals: usize, unit: &str) -> String {
    format!("{value:.decimals$} {unit}")
}

/// Formatted top/bottom EMF of the open conductor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitReadout {
    /// Upper half, volts.
    pub top: String,
    /// Lower half, volts.
    pub bottom: String,
}

/// Display-ready view of one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readout {
    /// Classification for the localised status message.
    pub status: OverlapState,
    /// Object name key for the localised status message.
    pub object: ObjectMode,
    /// Flux-change rate, `Wb/s`.
    pub flux_rate: String,
    /// Induced EMF, `V`.
    pub emf: String,
    /// Induced current, `A`; hidden for the conductor.
    pub current: Option<String>,
    /// Opposing force magnitude, `N`.
    pub force: String,
    /// Whether an opposing force is acting.
    pub active: bool,
    /// Conductor-only potential split.
    pub potential_split: Option<SplitReadout>,
}

impl Readout {
    /// Formats `snapshot` for `mode`.
    #[must_use]
    pub fn new(
        snapshot: &PhysicsSnapshot,
        mode: ObjectMode,
        split: Option<PotentialSplit>,
    ) -> Self {
        Self {
            status: snapshot.state,
            object: mode,
            flux_rate: format_quantity(snapshot.flux_change_rate, 3, "Wb/s"),
            emf: format_quantity(snapshot.emf, 3, "V"),
            current: mode
                .shows_current()
                .then(|| format_quantity(snapshot.current, 4, "A")),
            force: format_quantity(snapshot.lenz_force, 3, "N"),
            active: snapshot.is_opposing(),
            potential_split: split
                .filter(|_| mode.shows_potential_split())
                .map(|s| SplitReadout {
                    top: format_quantity(s.top, 3, "V"),
                    bottom: format_quantity(s.bottom, 3, "V"),
                }),
        }
    }
}

/// Consumer of physics output, typically a renderer.
#[cfg_attr(test, mockall::automock)]
pub trait DisplaySink {
    /// Shows a new readout.
    fn present(&mut self, readout: &Readout);
    /// Redraws the force-versus-position chart, oldest sample first.
    fn plot(&mut self, samples: &[HistorySample]);
}

/// Remembers what was last shown so unchanged frames are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReadoutGate {
    last: Option<(PhysicsSnapshot, ObjectMode, Option<PotentialSplit>)>,
}

impl ReadoutGate {
    /// Returns `true` if the display should be refreshed for these inputs,
    /// remembering them when it does.
    pub fn admit(
        &mut self,
        snapshot: &PhysicsSnapshot,
        mode: ObjectMode,
        split: Option<PotentialSplit>,
    ) -> bool {
        let changed = match &self.last {
            None => true,
            Some((previous, previous_mode, previous_split)) => {
                *previous_mode != mode
                    || snapshot.differs_noticeably(previous)
                    || split_changed(previous_split.as_ref(), split.as_ref())
            }
        };
        if changed {
            self.last = Some((*snapshot, mode, split));
        }
        changed
    }

    /// Forces the next call to [`ReadoutGate::admit`] to succeed.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

fn split_changed(previous: Option<&PotentialSplit>, current: Option<&PotentialSplit>) -> bool {
    match (previous, current) {
        (None, None) => false,
        (Some(a), Some(b)) => {
            (a.top - b.top).abs() > DISPLAY_CHANGE_THRESHOLD
                || (a.bottom - b.bottom).abs() > DISPLAY_CHANGE_THRESHOLD
        }
        _ => true,
    }
}
