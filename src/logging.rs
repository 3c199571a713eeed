//! Log file setup
//!
//! The TUI owns stdout, so tracing output goes to
//! ~/.cache/finwatch/finwatch.log. Filter with `FINWATCH_LOG`
//! (same syntax as `RUST_LOG`), default `info`.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_FILTER_ENV: &str = "FINWATCH_LOG";

/// Get the log file path
pub fn path() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .context("Could not determine cache directory")?
        .join("finwatch");
    Ok(dir.join("finwatch.log"))
}

/// Install the global subscriber writing to the log file.
/// Returns the file path for the startup banner.
pub fn init() -> Result<PathBuf> {
    let path = path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(path)
}
