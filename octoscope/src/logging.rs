//! Structured logging to a file.
//!
//! The TUI owns stderr, so tracing output goes to `octoscope.log` in the data
//! directory. `RUST_LOG` takes precedence over the configured level.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber writing to `<dir>/octoscope.log`.
///
/// Returns the log file path so startup can mention it.
///
/// # Errors
///
/// Returns `Err` if the directory or file cannot be created, or a global
/// subscriber is already installed.
pub fn init(dir: &Path, level: &str) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join("octoscope.log");
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(std::io::Error::other)?;

    Ok(path)
}
