use std::time::{Duration, Instant};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// The repeating one-second schedule that exists only while the engine is
/// running. Dropping it (or calling [`TickTask::cancel`]) stops the ticks.
#[derive(Debug)]
pub struct TickTask {
    period: Duration,
    next_due: Instant,
}

impl TickTask {
    pub fn start(now: Instant) -> Self {
        Self::with_period(now, TICK_PERIOD)
    }

    pub fn with_period(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Consumes one tick if its deadline has passed by `now`. Call in a loop
    /// to drain ticks missed while the event loop was busy.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if now >= self.next_due {
            self.next_due += self.period;
            true
        } else {
            false
        }
    }

    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_due_before_first_period() {
        let t0 = Instant::now();
        let mut task = TickTask::start(t0);
        assert!(!task.take_due(t0 + Duration::from_millis(999)));
    }

    #[test]
    fn drains_missed_ticks_one_at_a_time() {
        let t0 = Instant::now();
        let mut task = TickTask::start(t0);
        let late = t0 + Duration::from_millis(3500);

        let mut fired = 0;
        while task.take_due(late) {
            fired += 1;
        }
        assert_eq!(fired, 3);
        assert_eq!(task.next_due(), t0 + Duration::from_secs(4));
    }
}
