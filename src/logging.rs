//! Logging setup.
//!
//! The terminal belongs to the UI, so logs go to a daily rolling file in
//! `~/.quire/logs/`. The level is controlled by `QUIRE_LOG`:
//!
//! ```bash
//! QUIRE_LOG=debug quire
//! QUIRE_LOG=quire::backend=trace quire
//! ```

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::quire_dir;
use crate::error::{classify_io_error, QuireResult};

const LOG_FILE: &str = "quire.log";

/// Install the global subscriber.
pub fn init() -> QuireResult<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)
        .map_err(|e| classify_io_error(e, Some(log_dir.clone()), "create log directory"))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE);

    let env_filter =
        EnvFilter::try_from_env("QUIRE_LOG").unwrap_or_else(|_| EnvFilter::new("quire=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| crate::error::SystemError::Unavailable {
            resource: "logging".to_string(),
            message: e.to_string(),
        })?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "quire starting");
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(())
}

/// `~/.quire/logs`, or `./logs` without a home directory.
pub fn log_directory() -> PathBuf {
    quire_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_ends_with_logs() {
        assert!(log_directory().ends_with("logs"));
    }
}
