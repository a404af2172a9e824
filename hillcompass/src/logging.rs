//! Tracing subscriber setup.
//!
//! Logs go to stderr, or to a daily-rolling file when a directory is
//! configured. `RUST_LOG` overrides the configured level.

use std::path::PathBuf;

use thiserror::Error;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Levels accepted in `[logging] level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Prefix of rolled log files (`hillcompass.log.2026-10-16`).
pub const DEFAULT_LOG_FILE_PREFIX: &str = "hillcompass.log";

/// Logging settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for rolling log files. `None` logs to stderr.
    pub directory: Option<PathBuf>,
    /// File name prefix for rolled files.
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            directory: None,
            file_prefix: DEFAULT_LOG_FILE_PREFIX.to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Filter from `RUST_LOG`, falling back to the configured level.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }
}

/// Errors installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Install the global tracing subscriber.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the background writer.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard, LoggingError> {
    let timer = LocalTime::new(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
    ));

    let (writer, guard, ansi) = match &config.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory).map_err(|source| {
                LoggingError::CreateDirectory {
                    path: directory.clone(),
                    source,
                }
            })?;
            let appender = tracing_appender::rolling::daily(directory, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (writer, guard, false)
        }
        None => {
            let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
            (writer, guard, true)
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_timer(timer)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.directory.is_none());
        assert!(LOG_LEVELS.contains(&config.level.as_str()));
    }

    #[test]
    fn test_builders() {
        let config = LoggingConfig::default()
            .with_level("debug")
            .with_directory("/tmp/hillcompass");
        assert_eq!(config.level, "debug");
        assert_eq!(config.directory, Some(PathBuf::from("/tmp/hillcompass")));
    }

    #[test]
    fn test_init_creates_directory() {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("logs");
        let config = LoggingConfig::default().with_directory(&log_dir);

        // Another test may already own the global subscriber.
        let result = init_logging(&config);
        assert!(log_dir.is_dir());
        if let Err(e) = result {
            assert!(matches!(e, LoggingError::Install(_)));
        }
    }
}
