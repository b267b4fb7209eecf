use std::rc::Rc;

use crate::{
    alert::Alerter,
    clock::Clock,
    config::Config,
    engine::SessionObserver,
    error::Result,
    session::SessionType,
    stats::DailyStats,
    store::KeyValueStore,
};

/// Title and body for the notification raised when `completed` ends.
pub fn completion_message(completed: SessionType) -> (&'static str, &'static str) {
    match completed {
        SessionType::Work => ("Time for a break!", "Great work! Your break session is starting."),
        SessionType::Break => ("Time to focus!", "Your work session is starting now."),
    }
}

/// The side of the app that reacts to finished sessions: sound,
/// notification and today's focused minutes.
pub struct SessionShell<A: Alerter> {
    config: Config,
    stats: DailyStats,
    alerter: A,
    store: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
}

impl<A: Alerter> SessionShell<A> {
    pub fn new(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>, config: Config, alerter: A) -> Self {
        let stats = DailyStats::load(store.as_ref(), clock.today());
        Self {
            config,
            stats,
            alerter,
            store,
            clock,
        }
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn stats(&self) -> &DailyStats {
        &self.stats
    }

    pub fn alerter(&self) -> &A {
        &self.alerter
    }

    pub fn toggle_sound(&mut self) {
        self.config.sound_enabled = !self.config.sound_enabled;
    }

    pub fn toggle_notifications(&mut self) {
        self.config.notifications_enabled = !self.config.notifications_enabled;
    }
}

impl<A: Alerter> SessionObserver for SessionShell<A> {
    fn on_session_end(&mut self, completed: SessionType) -> Result<()> {
        if self.config.sound_enabled {
            if let Err(e) = self.alerter.play_sound() {
                tracing::warn!(error = %e, "could not play sound");
            }
        }

        if self.config.notifications_enabled {
            let (title, body) = completion_message(completed);
            if let Err(e) = self.alerter.notify(title, body) {
                tracing::warn!(error = %e, "could not show notification");
            }
        }

        self.stats
            .record_completion(completed, self.clock.today(), self.store.as_ref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alert::RecordingAlerter, clock::ManualClock, session::WORK_DURATION, store::MemoryStore};
    use chrono::NaiveDate;

    fn shell(config: Config, alerter: RecordingAlerter) -> SessionShell<RecordingAlerter> {
        let clock = ManualClock::new(0, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        SessionShell::new(Rc::new(MemoryStore::new()), Rc::new(clock), config, alerter)
    }

    #[test]
    fn work_completion_alerts_and_counts_minutes() {
        let mut shell = shell(Config::default(), RecordingAlerter::default());
        shell.on_session_end(SessionType::Work).unwrap();

        assert_eq!(shell.alerter().sounds, 1);
        assert_eq!(
            shell.alerter().notifications,
            vec![("Time for a break!".to_string(), "Great work! Your break session is starting.".to_string())]
        );
        assert_eq!(shell.stats().minutes, WORK_DURATION / 60);
        assert_eq!(shell.stats().date, "2024-03-09");
    }

    #[test]
    fn break_completion_does_not_count() {
        let mut shell = shell(Config::default(), RecordingAlerter::default());
        shell.on_session_end(SessionType::Break).unwrap();
        assert_eq!(shell.stats().minutes, 0);
        assert_eq!(shell.alerter().notifications[0].0, "Time to focus!");
    }

    #[test]
    fn disabled_outputs_are_skipped() {
        let config = Config {
            sound_enabled: false,
            notifications_enabled: false,
        };
        let mut shell = shell(config, RecordingAlerter::default());
        shell.on_session_end(SessionType::Work).unwrap();
        assert_eq!(shell.alerter().sounds, 0);
        assert!(shell.alerter().notifications.is_empty());
        assert_eq!(shell.stats().minutes, WORK_DURATION / 60);
    }

    #[test]
    fn alert_failures_are_swallowed() {
        let alerter = RecordingAlerter {
            fail: true,
            ..RecordingAlerter::default()
        };
        let mut shell = shell(Config::default(), alerter);
        assert!(shell.on_session_end(SessionType::Work).is_ok());
        assert_eq!(shell.stats().minutes, WORK_DURATION / 60);
    }

    #[test]
    fn completion_past_midnight_credits_the_new_day() {
        let clock = Rc::new(ManualClock::new(0, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()));
        let mut shell = SessionShell::new(
            Rc::new(MemoryStore::new()),
            clock.clone(),
            Config::default(),
            RecordingAlerter::default(),
        );
        shell.on_session_end(SessionType::Work).unwrap();

        clock.set_today(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        shell.on_session_end(SessionType::Work).unwrap();
        assert_eq!(shell.stats().date, "2024-03-10");
        assert_eq!(shell.stats().minutes, WORK_DURATION / 60);
    }

    #[test]
    fn toggles_flip_settings() {
        let mut shell = shell(Config::default(), RecordingAlerter::default());
        shell.toggle_sound();
        shell.toggle_notifications();
        assert!(!shell.config().sound_enabled);
        assert!(!shell.config().notifications_enabled);
    }
}
