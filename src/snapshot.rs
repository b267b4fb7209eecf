use serde::{Deserialize, Serialize};

use crate::session::SessionType;

pub const TIMER_STATE_KEY: &str = "timer-state";

/// Persisted engine state plus the wall-clock time it was written.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub time_left: u32,
    pub session_type: SessionType,
    pub is_active: bool,
    pub saved_at_epoch_ms: i64,
}

impl TimerSnapshot {
    /// Whole seconds between the write and `now_ms`. A clock that moved
    /// backwards counts as no time passed.
    pub fn elapsed_secs(&self, now_ms: i64) -> i64 {
        (now_ms - self.saved_at_epoch_ms).max(0) / 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_uses_camel_case() {
        let snap = TimerSnapshot {
            time_left: 90,
            session_type: SessionType::Work,
            is_active: true,
            saved_at_epoch_ms: 1_700_000_000_000,
        };
        let json = serde_json::to_string(&snap).unwrap();
        assert_eq!(
            json,
            r#"{"timeLeft":90,"sessionType":"WORK","isActive":true,"savedAtEpochMs":1700000000000}"#
        );
    }

    #[test]
    fn elapsed_floors_and_ignores_backwards_clock() {
        let snap = TimerSnapshot {
            time_left: 10,
            session_type: SessionType::Break,
            is_active: true,
            saved_at_epoch_ms: 10_000,
        };
        assert_eq!(snap.elapsed_secs(12_999), 2);
        assert_eq!(snap.elapsed_secs(5_000), 0);
    }

    #[test]
    fn rejects_negative_time_left() {
        let raw = r#"{"timeLeft":-5,"sessionType":"WORK","isActive":false,"savedAtEpochMs":0}"#;
        assert!(serde_json::from_str::<TimerSnapshot>(raw).is_err());
    }
}
