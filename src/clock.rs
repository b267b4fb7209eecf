use chrono::NaiveDate;
use std::cell::Cell;

pub const DAILY_FMT: &str = "%Y-%m-%d";

/// Wall-clock source. Tick scheduling uses `Instant`; this is only for the
/// snapshot timestamp and the calendar day.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
    /// The current local calendar day.
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    /// Local calendar day, not UTC: stats roll over at the user's midnight.
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Hand-driven clock for tests.
#[derive(Debug)]
pub struct ManualClock {
    now_ms: Cell<i64>,
    today: Cell<NaiveDate>,
}

impl ManualClock {
    pub fn new(now_ms: i64, today: NaiveDate) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
            today: Cell::new(today),
        }
    }

    pub fn set_ms(&self, now_ms: i64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance_ms(&self, delta: i64) {
        self.now_ms.set(self.now_ms.get() + delta);
    }

    pub fn set_today(&self, today: NaiveDate) {
        self.today.set(today);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }

    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

pub fn day_string(day: NaiveDate) -> String {
    day.format(DAILY_FMT).to_string()
}
