//! Addressable configuration keys for `config get/set/list`.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::{ConfigError, ConfigFile};
use crate::heading::HeadingStrategy;
use crate::logging::LOG_LEVELS;

/// A single `section.key` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    LookupBaseUrl,
    LookupRadius,
    LookupTimeoutSecs,
    RefreshMinDistance,
    HeadingStrategy,
    HeadingMountOffset,
    HeadingMaxTilt,
    OverlayRadius,
    OverlayScaleX,
    OverlayScaleY,
    OverlayDialOffset,
    LoggingLevel,
    LoggingDirectory,
}

const ALL_KEYS: [ConfigKey; 13] = [
    ConfigKey::LookupBaseUrl,
    ConfigKey::LookupRadius,
    ConfigKey::LookupTimeoutSecs,
    ConfigKey::RefreshMinDistance,
    ConfigKey::HeadingStrategy,
    ConfigKey::HeadingMountOffset,
    ConfigKey::HeadingMaxTilt,
    ConfigKey::OverlayRadius,
    ConfigKey::OverlayScaleX,
    ConfigKey::OverlayScaleY,
    ConfigKey::OverlayDialOffset,
    ConfigKey::LoggingLevel,
    ConfigKey::LoggingDirectory,
];

impl ConfigKey {
    /// Every key, grouped by section in file order.
    pub fn all() -> &'static [ConfigKey] {
        &ALL_KEYS
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// INI section the key lives in.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::LookupBaseUrl | ConfigKey::LookupRadius | ConfigKey::LookupTimeoutSecs => {
                "lookup"
            }
            ConfigKey::RefreshMinDistance => "refresh",
            ConfigKey::HeadingStrategy
            | ConfigKey::HeadingMountOffset
            | ConfigKey::HeadingMaxTilt => "heading",
            ConfigKey::OverlayRadius
            | ConfigKey::OverlayScaleX
            | ConfigKey::OverlayScaleY
            | ConfigKey::OverlayDialOffset => "overlay",
            ConfigKey::LoggingLevel | ConfigKey::LoggingDirectory => "logging",
        }
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::LookupBaseUrl => "base_url",
            ConfigKey::LookupRadius => "radius",
            ConfigKey::LookupTimeoutSecs => "timeout_secs",
            ConfigKey::RefreshMinDistance => "min_distance_m",
            ConfigKey::HeadingStrategy => "strategy",
            ConfigKey::HeadingMountOffset => "mount_offset",
            ConfigKey::HeadingMaxTilt => "max_tilt",
            ConfigKey::OverlayRadius => "radius",
            ConfigKey::OverlayScaleX => "scale_x",
            ConfigKey::OverlayScaleY => "scale_y",
            ConfigKey::OverlayDialOffset => "dial_offset",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingDirectory => "directory",
        }
    }

    /// Current value as written to the file. Empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::LookupBaseUrl => config.lookup.base_url.clone(),
            ConfigKey::LookupRadius => config.lookup.radius.to_string(),
            ConfigKey::LookupTimeoutSecs => config.lookup.timeout.as_secs().to_string(),
            ConfigKey::RefreshMinDistance => config.refresh.min_distance_meters.to_string(),
            ConfigKey::HeadingStrategy => config.heading.strategy.to_string(),
            ConfigKey::HeadingMountOffset => config.heading.mount_offset_degrees.to_string(),
            ConfigKey::HeadingMaxTilt => config.heading.max_tilt_degrees.to_string(),
            ConfigKey::OverlayRadius => config.overlay.radius.to_string(),
            ConfigKey::OverlayScaleX => config.overlay.scale_x.to_string(),
            ConfigKey::OverlayScaleY => config.overlay.scale_y.to_string(),
            ConfigKey::OverlayDialOffset => config.overlay.dial_offset_degrees.to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingDirectory => config
                .logging
                .directory
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Parse and store `value`, leaving the config untouched on error.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::LookupBaseUrl => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(self.invalid(value, "must start with http:// or https://"));
                }
                config.lookup.base_url = value.trim_end_matches('/').to_string();
            }
            ConfigKey::LookupRadius => config.lookup.radius = self.positive(value)?,
            ConfigKey::LookupTimeoutSecs => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| self.invalid(value, "expected whole seconds"))?;
                if secs == 0 {
                    return Err(self.invalid(value, "must be at least 1"));
                }
                config.lookup.timeout = Duration::from_secs(secs);
            }
            ConfigKey::RefreshMinDistance => {
                let meters = self.finite(value)?;
                if meters < 0.0 {
                    return Err(self.invalid(value, "must not be negative"));
                }
                config.refresh.min_distance_meters = meters;
            }
            ConfigKey::HeadingStrategy => {
                config.heading.strategy = value
                    .parse::<HeadingStrategy>()
                    .map_err(|reason| self.invalid(value, &reason))?;
            }
            ConfigKey::HeadingMountOffset => {
                config.heading.mount_offset_degrees = self.finite(value)?
            }
            ConfigKey::HeadingMaxTilt => {
                let degrees = self.positive(value)?;
                if degrees > 90.0 {
                    return Err(self.invalid(value, "must be at most 90"));
                }
                config.heading.max_tilt_degrees = degrees;
            }
            ConfigKey::OverlayRadius => config.overlay.radius = self.positive(value)?,
            ConfigKey::OverlayScaleX => config.overlay.scale_x = self.positive(value)?,
            ConfigKey::OverlayScaleY => config.overlay.scale_y = self.positive(value)?,
            ConfigKey::OverlayDialOffset => {
                config.overlay.dial_offset_degrees = self.finite(value)?
            }
            ConfigKey::LoggingLevel => {
                let level = value.to_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(self.invalid(value, &format!("expected one of {:?}", LOG_LEVELS)));
                }
                config.logging.level = level;
            }
            ConfigKey::LoggingDirectory => {
                config.logging.directory = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
        }
        Ok(())
    }

    fn invalid(&self, value: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    fn finite(&self, value: &str) -> Result<f64, ConfigError> {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.invalid(value, "expected a number"))
    }

    fn positive(&self, value: &str) -> Result<f64, ConfigError> {
        let number = self.finite(value)?;
        if number <= 0.0 {
            return Err(self.invalid(value, "must be greater than 0"));
        }
        Ok(number)
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ALL_KEYS
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
