use std::io;
use thiserror::Error;

/// Everything in focusflow that can fail. None of these are fatal to the
/// countdown; callers log them and fall back to defaults.
#[derive(Error, Debug)]
pub enum FocusError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("notification failed: {0}")]
    Notification(String),

    #[error("sound playback failed: {0}")]
    Audio(String),
}

pub type Result<T> = std::result::Result<T, FocusError>;
