//! Configuration file handling.
//!
//! Settings live in an INI file at `~/.config/hillcompass/config.ini` (or the
//! platform equivalent). A missing file yields defaults; a present file only
//! needs the keys it wants to override.
//!
//! ```ini
//! [lookup]
//! base_url = http://127.0.0.1:8000
//! radius = 25
//! timeout_secs = 10
//!
//! [refresh]
//! min_distance_m = 1
//!
//! [heading]
//! strategy = fused
//! mount_offset = 0
//! max_tilt = 25
//!
//! [overlay]
//! radius = 100
//! scale_x = 1.8
//! scale_y = 0.9
//! dial_offset = -90
//!
//! [logging]
//! level = info
//! directory = /var/log/hillcompass
//! ```

mod file;
mod keys;

pub use file::{config_file_path, ConfigFile, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use keys::ConfigKey;

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading, saving or editing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read or parsed.
    #[error("Failed to read config file {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    /// The file could not be written.
    #[error("Failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A key holds a value that does not parse or is out of range.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// `section.key` does not name a known setting.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}
