use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_FILTER_ENV: &str = "GRID_SNAKE_LOG";

const DEFAULT_FILTER: &str = "info";

/// Sends log records to `path`, appending to any previous run.
///
/// The terminal UI owns stdout and stderr while a game is running, so
/// interactive sessions only ever log to a file.
pub fn init_file_logging(path: &Path) -> io::Result<()> {
    let file = open_log_file(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(io::Error::other)
}

/// Sends log records to stderr; used by headless runs.
pub fn init_stderr_logging() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .try_init()
        .map_err(io::Error::other)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    OpenOptions::new().create(true).append(true).open(path)
}
