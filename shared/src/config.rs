//! Dial configuration and its persistence
//!
//! Configuration lives as TOML under the platform config directory, one file
//! per front end.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::mapping::MINUTES_PER_DAY;
use crate::scale::TimeScale;

/// Angular hit radius around a handle, in degrees
pub const DEFAULT_HIT_THRESHOLD: f64 = 28.0;

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Knobs recognised by the dial controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialConfig {
    pub scale: TimeScale,
    /// Minute of day shown at 12 o'clock
    pub base_offset: u32,
    pub allow_multi_lap: bool,
    pub hit_threshold_degrees: f64,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            scale: TimeScale::OneHour,
            base_offset: 0,
            allow_multi_lap: false,
            hit_threshold_degrees: DEFAULT_HIT_THRESHOLD,
        }
    }
}

impl DialConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_offset >= MINUTES_PER_DAY {
            return Err(ConfigError::Invalid {
                field: "base_offset",
                reason: format!("{} is not a minute of the day", self.base_offset),
            });
        }
        if !(self.hit_threshold_degrees > 0.0 && self.hit_threshold_degrees < 180.0) {
            return Err(ConfigError::Invalid {
                field: "hit_threshold_degrees",
                reason: format!("{} is outside (0, 180)", self.hit_threshold_degrees),
            });
        }
        Ok(())
    }

    /// Clamp out-of-range values instead of rejecting them
    pub fn sanitized(mut self) -> Self {
        self.base_offset %= MINUTES_PER_DAY;
        if !(self.hit_threshold_degrees > 0.0 && self.hit_threshold_degrees < 180.0) {
            self.hit_threshold_degrees = DEFAULT_HIT_THRESHOLD;
        }
        self
    }
}

/// Get the base configuration directory for all dials
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "session-dial", "dials").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the configuration file path for a specific front end
pub fn config_path(app_name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(format!("{}.toml", app_name)))
}

/// Load configuration for a specific front end
///
/// Returns `None` if the config file doesn't exist yet.
pub fn load_config<T: DeserializeOwned>(app_name: &str) -> Result<Option<T>, ConfigError> {
    let path = config_path(app_name).ok_or(ConfigError::NoConfigDir)?;

    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)?;
    let config: T = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Save configuration for a specific front end
pub fn save_config<T: Serialize>(app_name: &str, config: &T) -> Result<(), ConfigError> {
    let path = config_path(app_name).ok_or(ConfigError::NoConfigDir)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(&path, contents)?;
    log::debug!("saved config to {}", path.display());
    Ok(())
}

/// Delete configuration for a specific front end
pub fn delete_config(app_name: &str) -> Result<(), ConfigError> {
    let path = config_path(app_name).ok_or(ConfigError::NoConfigDir)?;

    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path() {
        if let Some(path) = config_path("test_dial") {
            assert!(path.to_string_lossy().ends_with("test_dial.toml"));
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DialConfig {
            scale: TimeScale::HalfDay,
            base_offset: 480,
            allow_multi_lap: true,
            hit_threshold_degrees: 20.0,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: DialConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: DialConfig = toml::from_str("scale = \"full_day\"").unwrap();
        assert_eq!(parsed.scale, TimeScale::FullDay);
        assert_eq!(parsed.base_offset, 0);
        assert!(!parsed.allow_multi_lap);
        assert_eq!(parsed.hit_threshold_degrees, DEFAULT_HIT_THRESHOLD);
    }

    #[test]
    fn test_validate() {
        assert!(DialConfig::default().validate().is_ok());

        let bad_offset = DialConfig {
            base_offset: 1440,
            ..DialConfig::default()
        };
        assert!(matches!(
            bad_offset.validate(),
            Err(ConfigError::Invalid { field: "base_offset", .. })
        ));

        let bad_threshold = DialConfig {
            hit_threshold_degrees: 0.0,
            ..DialConfig::default()
        };
        assert!(bad_threshold.validate().is_err());
    }

    #[test]
    fn test_sanitized() {
        let config = DialConfig {
            base_offset: 1500,
            hit_threshold_degrees: f64::NAN,
            ..DialConfig::default()
        }
        .sanitized();
        assert_eq!(config.base_offset, 60);
        assert_eq!(config.hit_threshold_degrees, DEFAULT_HIT_THRESHOLD);
        assert!(config.validate().is_ok());
    }
}
