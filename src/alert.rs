use notify_rust::{Notification, Urgency};
use std::{
    path::Path,
    process::{Command, Stdio},
};

use crate::error::{FocusError, Result};

/// Outbound session-end signals: a chime and a desktop notification.
pub trait Alerter {
    fn play_sound(&mut self) -> Result<()>;
    fn notify(&mut self, title: &str, body: &str) -> Result<()>;
}

const SOUND_PLAYERS: [(&str, &str); 3] = [
    ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
    ("aplay", "/usr/share/sounds/generic.wav"),
];

/// Desktop notifications through notify-rust, sound through whichever
/// system player has a sample installed.
#[derive(Debug, Default)]
pub struct DesktopAlerter;

impl Alerter for DesktopAlerter {
    fn play_sound(&mut self) -> Result<()> {
        let (cmd, file) = SOUND_PLAYERS
            .iter()
            .find(|(_, file)| Path::new(file).exists())
            .ok_or_else(|| FocusError::Audio("no system sound sample found".into()))?;

        let mut child = Command::new(cmd)
            .arg(file)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| FocusError::Audio(format!("{cmd}: {e}")))?;

        // Reap the player off the UI thread.
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }

    fn notify(&mut self, title: &str, body: &str) -> Result<()> {
        Notification::new()
            .summary(title)
            .body(body)
            .appname("focusflow")
            .icon("alarm-clock")
            .urgency(Urgency::Critical)
            .show()
            .map(|_| ())
            .map_err(|e| FocusError::Notification(e.to_string()))
    }
}

/// Alerter that records what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingAlerter {
    pub sounds: usize,
    pub notifications: Vec<(String, String)>,
    pub fail: bool,
}

impl Alerter for RecordingAlerter {
    fn play_sound(&mut self) -> Result<()> {
        self.sounds += 1;
        if self.fail {
            return Err(FocusError::Audio("autoplay blocked".into()));
        }
        Ok(())
    }

    fn notify(&mut self, title: &str, body: &str) -> Result<()> {
        self.notifications.push((title.to_string(), body.to_string()));
        if self.fail {
            return Err(FocusError::Notification("no notification daemon".into()));
        }
        Ok(())
    }
}
