//! Coalescing of rapid parameter-driven refreshes.
//!
//! Slider drags fire far more often than the display can usefully redraw.
//! The throttle admits at most one refresh per interval of simulation clock
//! and remembers that a denied refresh is still owed.

use std::time::Duration;

use crate::REFRESH_INTERVAL_MS;

/// Admits at most one refresh per `interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshThrottle {
    interval: Duration,
    last: Option<Duration>,
    pending: bool,
}

impl Default for RefreshThrottle {
    fn default() -> Self {
        Self::new(Duration::from_millis(REFRESH_INTERVAL_MS))
    }
}

impl RefreshThrottle {
    /// Creates a throttle with the given minimum spacing.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
            pending: false,
        }
    }

    /// Asks for a refresh at clock time `now`.
    ///
    /// Returns `true` if the refresh may run now. Otherwise the request is
    /// remembered as pending.
    pub fn admit(&mut self, now: Duration) -> bool {
        let ready = self
            .last
            .map_or(true, |last| now.saturating_sub(last) >= self.interval);
        if ready {
            self.last = Some(now);
            self.pending = false;
        } else {
            self.pending = true;
        }
        ready
    }

    /// Whether a denied refresh is still owed.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Marks the owed refresh as delivered at clock time `now`.
    pub fn settle(&mut self, now: Duration) {
        if self.pending {
            self.pending = false;
            self.last = Some(now);
        }
    }

    /// Forgets all history.
    pub fn reset(&mut self) {
        self.last = None;
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[rstest]
    fn bursts_are_coalesced() {
        let mut throttle = RefreshThrottle::default();
        assert!(throttle.admit(ms(0)));
        assert!(!throttle.admit(ms(5)));
        assert!(!throttle.admit(ms(15)));
        assert!(throttle.is_pending());
        assert!(throttle.admit(ms(16)));
        assert!(!throttle.is_pending());
    }

    #[rstest]
    fn settling_clears_pending() {
        let mut throttle = RefreshThrottle::new(ms(10));
        throttle.admit(ms(0));
        throttle.admit(ms(3));
        throttle.settle(ms(8));
        assert!(!throttle.is_pending());
        assert!(!throttle.admit(ms(12)));
        assert!(throttle.admit(ms(18)));
    }

    #[rstest]
    fn reset_admits_immediately() {
        let mut throttle = RefreshThrottle::default();
        throttle.admit(ms(100));
        throttle.reset();
        assert!(throttle.admit(ms(101)));
    }
}
