use serde::{Deserialize, Serialize};

/// Nominal length of a work session, in seconds.
pub const WORK_DURATION: u32 = 25 * 60;
/// Nominal length of a break session, in seconds.
pub const BREAK_DURATION: u32 = 5 * 60;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionType {
    Work,
    Break,
}

impl SessionType {
    pub const fn nominal_duration(self) -> u32 {
        match self {
            Self::Work => WORK_DURATION,
            Self::Break => BREAK_DURATION,
        }
    }

    /// The session that follows this one.
    pub const fn other(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Work => "Focus",
            Self::Break => "Break",
        }
    }
}

/// Formats a second count as `MM:SS`.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
