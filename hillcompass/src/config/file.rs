//! INI-backed configuration file.

use std::path::{Path, PathBuf};

use ini::Ini;
use tracing::debug;

use super::{ConfigError, ConfigKey};
use crate::heading::HeadingConfig;
use crate::logging::LoggingConfig;
use crate::overlay::DialLayout;
use crate::provider::LookupConfig;
use crate::refresh::RefreshConfig;
use crate::session::SessionConfig;

/// Directory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "hillcompass";

/// File name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Location of the user configuration file.
///
/// Falls back to the working directory when the platform has no config dir.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// All persisted settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigFile {
    pub lookup: LookupConfig,
    pub refresh: RefreshConfig,
    pub heading: HeadingConfig,
    pub overlay: DialLayout,
    pub logging: LoggingConfig,
}

impl ConfigFile {
    /// Load from [`config_file_path`]; defaults when the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from an explicit path; defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config = Self::from_ini(&ini)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Build from parsed INI, applying each known key that is present.
    ///
    /// Unknown sections and keys are ignored.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for key in ConfigKey::all() {
            let value = ini
                .section(Some(key.section()))
                .and_then(|section| section.get(key.key_name()));
            if let Some(value) = value {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Render every set key into INI form.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section()))
                    .set(key.key_name(), value);
            }
        }
        ini
    }

    /// Write to [`config_file_path`], creating the directory if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Write to an explicit path, creating parent directories if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        self.to_ini().write_to_file(path).map_err(write_err)?;
        debug!(path = %path.display(), "Saved config file");
        Ok(())
    }

    /// Session settings derived from this file.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_heading(self.heading.clone())
            .with_refresh(self.refresh.clone())
            .with_layout(self.overlay)
    }
}
