use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

use crate::{
    alert::Alerter,
    engine::TimerEngine,
    session::format_clock,
    shell::SessionShell,
};

pub const IDLE_TITLE: &str = "FocusFlow - Pomodoro Timer";

/// Engine plus the bits of shell state the key handlers need.
pub struct App<A: Alerter> {
    pub engine: TimerEngine<SessionShell<A>>,
    state_dir: PathBuf,
}

impl<A: Alerter> App<A> {
    pub fn new(engine: TimerEngine<SessionShell<A>>, state_dir: PathBuf) -> Self {
        Self { engine, state_dir }
    }

    pub fn shell(&self) -> &SessionShell<A> {
        self.engine.observer()
    }

    /// Terminal title: the live countdown while running.
    pub fn title(&self) -> String {
        if self.engine.is_active() {
            format!(
                "{} - {} | FocusFlow",
                format_clock(self.engine.time_left()),
                self.engine.session_type().label()
            )
        } else {
            IDLE_TITLE.to_string()
        }
    }

    /// Applies one key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return true;
        }

        match key.code {
            KeyCode::Char(' ') => {
                if self.engine.is_active() {
                    self.engine.pause();
                } else {
                    self.engine.start();
                }
            }
            KeyCode::Char('r') => self.engine.reset(),
            KeyCode::Char('s') => {
                self.engine.observer_mut().toggle_sound();
                self.save_config();
            }
            KeyCode::Char('n') => {
                self.engine.observer_mut().toggle_notifications();
                self.save_config();
            }
            _ => {}
        }
        false
    }

    fn save_config(&self) {
        if let Err(e) = self.shell().config().save(&self.state_dir) {
            tracing::warn!(error = %e, "could not save settings");
        }
    }
}
