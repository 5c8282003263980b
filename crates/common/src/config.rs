//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Relative-pressure threshold below which a move update is discarded.
///
/// When pressure drops quickly between two events the reported positions
/// tend to be imprecise, which usually means a finger is being lifted.
pub const DEFAULT_PRESSURE_THRESHOLD: f64 = 0.67;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gesture detector tuning.
    pub detector: DetectorConfig,

    /// Demo host parameters.
    pub host: HostConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Tuning shared by every gesture detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Minimum `current / previous` pressure ratio for an update to be
    /// delivered to the listener.
    pub pressure_threshold: f64,
}

/// Parameters of the demo host that composes detector outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Intrinsic width of the transformed image (px).
    pub image_width: f64,

    /// Intrinsic height of the transformed image (px).
    pub image_height: f64,

    /// Scale factor applied before any gesture.
    pub initial_scale: f64,

    /// Lower clamp for the accumulated scale.
    pub min_scale: f64,

    /// Upper clamp for the accumulated scale.
    pub max_scale: f64,

    /// Alpha channel value before any shove (0-255).
    pub initial_alpha: u8,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "multitouch_detectors=trace,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            pressure_threshold: DEFAULT_PRESSURE_THRESHOLD,
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            image_width: 512.0,
            image_height: 512.0,
            initial_scale: 0.4,
            min_scale: 0.1,
            max_scale: 10.0,
            initial_alpha: 255,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &std::path::Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("multitouch").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_values() {
        let config = AppConfig::default();
        assert_eq!(config.detector.pressure_threshold, 0.67);
        assert_eq!(config.host.initial_scale, 0.4);
        assert_eq!(config.host.min_scale, 0.1);
        assert_eq!(config.host.max_scale, 10.0);
        assert_eq!(config.host.initial_alpha, 255);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let raw = r#"{ "detector": { "pressure_threshold": 0.5 } }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.detector.pressure_threshold, 0.5);
        assert_eq!(config.host, HostConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_invalid_file_falls_back() {
        let dir = std::env::temp_dir().join("multitouch_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.detector, DetectorConfig::default());

        std::fs::remove_dir_all(&dir).ok();
    }
}
