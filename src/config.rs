use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::Result;

pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "focusflow.log";

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Clone, Debug, Default)]
#[command(author, version, about = "🍅 focusflow - a terminal focus timer")]
pub struct Args {
    /// Where timer state, stats, config and logs are kept
    #[arg(long, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,
    /// Start with sound turned off
    #[arg(long)]
    pub no_sound: bool,
    /// Start with desktop notifications turned off
    #[arg(long)]
    pub no_notifications: bool,
    /// Ignore the saved timer and start a fresh work session
    #[arg(long)]
    pub fresh: bool,
    /// Log filter, e.g. `debug` or `focusflow=trace`
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub sound_enabled: bool,
    pub notifications_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            notifications_enabled: true,
        }
    }
}

impl Config {
    /// Loads the saved settings and applies CLI overrides on top.
    pub fn resolve(dir: &Path, args: &Args) -> Self {
        let mut config = load_json::<Config>(&dir.join(CONFIG_FILE));
        if args.no_sound {
            config.sound_enabled = false;
        }
        if args.no_notifications {
            config.notifications_enabled = false;
        }
        config
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        save_json(&dir.join(CONFIG_FILE), self)
    }
}

/// The state directory: `--state-dir`, else the platform data dir, else
/// `./focusflow`.
pub fn state_dir(args: &Args) -> PathBuf {
    if let Some(dir) = &args.state_dir {
        return dir.clone();
    }
    ProjectDirs::from("", "", "focusflow")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("focusflow"))
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> T {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(data)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(Config::resolve(dir.path(), &Args::default()), Config::default());
    }

    #[test]
    fn saved_settings_survive_and_flags_override() {
        let dir = tempdir().unwrap();
        let saved = Config {
            sound_enabled: true,
            notifications_enabled: false,
        };
        saved.save(dir.path()).unwrap();

        assert_eq!(Config::resolve(dir.path(), &Args::default()), saved);

        let args = Args {
            no_sound: true,
            ..Args::default()
        };
        let cfg = Config::resolve(dir.path(), &args);
        assert!(!cfg.sound_enabled);
        assert!(!cfg.notifications_enabled);
    }

    #[test]
    fn partial_config_fills_missing_fields() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), r#"{"sound_enabled": false}"#).unwrap();
        let cfg = Config::resolve(dir.path(), &Args::default());
        assert!(!cfg.sound_enabled);
        assert!(cfg.notifications_enabled);
    }

    #[test]
    fn explicit_state_dir_wins() {
        let args = Args::parse_from(["focusflow", "--state-dir", "/tmp/ff", "--fresh"]);
        assert_eq!(state_dir(&args), PathBuf::from("/tmp/ff"));
        assert!(args.fresh);
    }
}
