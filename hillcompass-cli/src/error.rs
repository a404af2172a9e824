//! CLI error type.

use std::fmt;

use hillcompass::config::ConfigError;
use hillcompass::logging::LoggingError;
use hillcompass::provider::LookupError;
use hillcompass::CompassError;

/// Errors that end a CLI command.
#[derive(Debug)]
pub enum CliError {
    /// Bad configuration or arguments.
    Config(String),
    /// Logging could not be set up.
    Logging(LoggingError),
    /// Landmark lookup failed.
    Lookup(LookupError),
    /// Compass pipeline error.
    Compass(CompassError),
    /// A trace line could not be parsed.
    Trace { line: usize, message: String },
    /// Reading input or starting the runtime failed.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Logging(e) => write!(f, "{}", e),
            CliError::Lookup(e) => write!(f, "Landmark lookup failed: {}", e),
            CliError::Compass(e) => write!(f, "{}", e),
            CliError::Trace { line, message } => {
                write!(f, "Invalid trace line {}: {}", line, message)
            }
            CliError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Logging(e) => Some(e),
            CliError::Lookup(e) => Some(e),
            CliError::Compass(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Config(_) | CliError::Trace { .. } => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<LookupError> for CliError {
    fn from(e: LookupError) -> Self {
        CliError::Lookup(e)
    }
}

impl From<CompassError> for CliError {
    fn from(e: CompassError) -> Self {
        CliError::Compass(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
