//! A display sink that keeps everything it receives.

use faraday::{DisplaySink, HistorySample, Readout};

/// Records every readout and chart update in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    /// Presented readouts, oldest first.
    pub readouts: Vec<Readout>,
    /// Chart redraws, oldest first.
    pub plots: Vec<Vec<HistorySample>>,
}

impl RecordingSink {
    /// The most recently presented readout.
    #[must_use]
    pub fn last(&self) -> Option<&Readout> {
        self.readouts.last()
    }
}

impl DisplaySink for RecordingSink {
    fn present(&mut self, readout: &Readout) {
        self.readouts.push(readout.clone());
    }

    fn plot(&mut self, samples: &[HistorySample]) {
        self.plots.push(samples.to_vec());
    }
}
