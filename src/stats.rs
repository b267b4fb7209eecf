use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    clock::day_string,
    session::{SessionType, WORK_DURATION},
    store::{KeyValueStore, load_record, save_record},
};

pub const DAILY_STATS_KEY: &str = "daily-stats";

/// Focused minutes for one calendar day. Only completed work sessions count.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DailyStats {
    pub date: String,
    pub minutes: u32,
}

impl DailyStats {
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            date: day_string(today),
            minutes: 0,
        }
    }

    /// Loads today's record. A record from another day (or none at all)
    /// is replaced with an empty one for today, which is written back.
    pub fn load(store: &dyn KeyValueStore, today: NaiveDate) -> Self {
        match load_record::<DailyStats>(store, DAILY_STATS_KEY) {
            Some(stats) if stats.date == day_string(today) => stats,
            previous => {
                if let Some(old) = previous {
                    tracing::info!(date = %old.date, minutes = old.minutes, "rolling over daily stats");
                }
                let stats = Self::empty(today);
                save_record(store, DAILY_STATS_KEY, &stats);
                stats
            }
        }
    }

    /// Credits a finished session and persists the result. Breaks are
    /// ignored. If the day changed since the record was loaded, the count
    /// starts over for the new day first.
    pub fn record_completion(&mut self, completed: SessionType, today: NaiveDate, store: &dyn KeyValueStore) {
        if completed != SessionType::Work {
            return;
        }
        let today = day_string(today);
        if self.date != today {
            self.date = today;
            self.minutes = 0;
        }
        self.minutes += WORK_DURATION / 60;
        save_record(store, DAILY_STATS_KEY, self);
    }
}
