//! Tracing setup shared by both binaries.
//!
//! Logs go to a daily-rolling file under the logs directory so they never
//! interleave with the interactive chat. `RUST_LOG` overrides the default
//! filter.

use crate::paths::MindTrackPaths;
use mindtrack_core::MindTrackError;
use mindtrack_core::error::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub const DEFAULT_LOG_FILTER: &str = "mindtrack=info";
const LOG_FILE_PREFIX: &str = "mindtrack.log";

/// Installs the global subscriber.
///
/// The returned guard flushes buffered lines on drop and must be held for
/// the lifetime of `main`. Calling this twice leaves the first subscriber in
/// place.
pub fn init_logging(paths: &MindTrackPaths) -> Result<WorkerGuard> {
    let logs_dir = paths
        .logs_dir()
        .map_err(|e| MindTrackError::config(format!("Failed to get logs path: {}", e)))?;
    std::fs::create_dir_all(&logs_dir)?;

    let file_appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_logs_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MindTrackPaths::new(Some(temp_dir.path()));

        let _guard = init_logging(&paths).unwrap();
        assert!(temp_dir.path().join("logs").is_dir());
    }
}
