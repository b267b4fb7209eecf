use std::{fs::OpenOptions, path::Path, sync::Mutex};
use tracing_subscriber::EnvFilter;

use crate::{config::LOG_FILE, error::Result};

const DEFAULT_FILTER: &str = "focusflow=info";

/// Sends tracing output to `<dir>/focusflow.log`; the terminal belongs to
/// the UI. `filter` wins over `RUST_LOG`, which wins over the default.
pub fn init(dir: &Path, filter: Option<&str>) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()),
    };

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
