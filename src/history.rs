//! Bounded `(position, force)` history feeding the force-versus-position chart.

use std::collections::VecDeque;

use serde::Serialize;

/// One chart sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistorySample {
    /// Object centre position.
    pub position: f64,
    /// Opposing-force magnitude at that position, N.
    pub force: f64,
}

/// Fixed-capacity ring of recent samples; the oldest sample is overwritten
/// once the ring is full.
///
/// Samples are only taken when the object moved further than the noise
/// threshold since the last recorded position.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer {
    samples: VecDeque<HistorySample>,
    capacity: usize,
    noise_threshold: f64,
    last_position: f64,
}

impl HistoryBuffer {
    /// Creates an empty buffer anchored at `origin`.
    ///
    /// A zero `capacity` is raised to one.
    #[must_use]
    pub fn new(capacity: usize, noise_threshold: f64, origin: f64) -> Self {
        let bounded = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(bounded),
            capacity: bounded,
            noise_threshold,
            last_position: origin,
        }
    }

    /// Appends a sample, evicting the oldest one when full.
    pub fn push(&mut self, sample: HistorySample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        self.last_position = sample.position;
    }

    /// Records `(position, force)` if `position` moved beyond the noise
    /// threshold since the last sample. Returns whether a sample was taken.
    pub fn record(&mut self, position: f64, force: f64) -> bool {
        if (position - self.last_position).abs() <= self.noise_threshold {
            return false;
        }
        self.push(HistorySample { position, force });
        true
    }

    /// Drops every sample and re-anchors the noise threshold at `origin`.
    pub fn clear(&mut self, origin: f64) {
        self.samples.clear();
        self.last_position = origin;
    }

    /// Samples from oldest to newest.
    pub fn samples(&self) -> impl Iterator<Item = &HistorySample> + '_ {
        self.samples.iter()
    }

    /// Most recent sample.
    #[must_use]
    pub fn latest(&self) -> Option<&HistorySample> {
        self.samples.back()
    }

    /// Number of stored samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
