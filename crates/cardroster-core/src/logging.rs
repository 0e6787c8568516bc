//! Logging init: append to a file under the XDG state dir, or stderr.
//!
//! Filtering follows `RUST_LOG`; without it, `info` globally and `debug` for
//! the cardroster crates.

use anyhow::Result;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,cardroster_core=debug,cardroster=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `~/.local/state/cardroster/cardroster.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cardroster")?;
    Ok(xdg_dirs.get_state_home().join("cardroster.log"))
}

/// Install the global subscriber writing to [`log_file_path`].
///
/// Returns the log path. On failure (unwritable state dir, subscriber already
/// set) the caller should fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    tracing::subscriber::set_global_default(file_subscriber(file))
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {}", e))?;

    tracing::info!("cardroster logging initialized at {}", path.display());
    Ok(path)
}

/// Plain-text subscriber appending to `file`; lines are serialized by a mutex.
fn file_subscriber(file: File) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish()
}

/// Log to stderr only. Never fails; a second call is ignored.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
