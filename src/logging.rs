use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::error::{DistroHubError, Result};

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "DISTROHUB_LOG";
const LOG_FILE: &str = "distrohub.log";

/// Default directory for the log file.
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|dir| dir.join("distrohub"))
}

/// Builds the filter from `DISTROHUB_LOG`, falling back to `level`.
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    match std::env::var(LOG_ENV) {
        Ok(value) if !value.trim().is_empty() => EnvFilter::try_new(value.trim())
            .map_err(|err| DistroHubError::logging(format!("{LOG_ENV}: {err}"))),
        _ => EnvFilter::try_new(level)
            .map_err(|err| DistroHubError::logging(format!("level {level:?}: {err}"))),
    }
}

/// Routes tracing output to `<dir>/distrohub.log`.
///
/// The terminal belongs to the UI, so nothing is written to stdout or stderr.
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init_logging(dir: &Path, level: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .map_err(|err| DistroHubError::logging(format!("{}: {err}", dir.display())))?;
    let filter = build_filter(level)?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true),
    );
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| DistroHubError::logging(err.to_string()))?;

    Ok(guard)
}
