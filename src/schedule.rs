use std::time::Duration;

/// Most ticks one frame may run to catch up after a stall.
pub const MAX_TICKS_PER_FRAME: u32 = 5;

/// Fixed-cadence accumulator deciding how many simulation ticks are due.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickClock {
    interval: Duration,
    accumulated: Duration,
}

impl TickClock {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        debug_assert!(!interval.is_zero());

        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Adds `elapsed` and returns the number of ticks that are now due.
    ///
    /// Backlog beyond [`MAX_TICKS_PER_FRAME`] intervals is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let cap = self.interval * MAX_TICKS_PER_FRAME;
        self.accumulated = (self.accumulated + elapsed).min(cap);

        let mut due = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            due += 1;
        }
        due
    }

    /// Drops any partial interval, e.g. after unpausing.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}
