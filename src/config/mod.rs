//! Configuration module for Storm Monitor
//!
//! This module handles the persistent configuration file and the runtime
//! display settings.
//!
//! # App Data Location
//!
//! The configuration is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.storm.monitor/`
//! - **macOS**: `~/Library/Application Support/dev.storm.monitor/`
//! - **Windows**: `%APPDATA%\dev.storm.monitor\`
//!
//! # Files
//!
//! - `config.toml` - Chart, notification, device and logging options
//! - `logs/` - Rolling log files, when file logging is enabled
//!
//! # Example
//!
//! ```ignore
//! use storm_monitor::config::AppConfig;
//!
//! let mut config = AppConfig::load()?;
//! config.chart.time_window_secs = 60.0;
//! config.save()?;
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{Result, ResultExt, StormError};
use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application identifier for data directories
pub const APP_ID: &str = "dev.storm.monitor";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Log directory name inside the app data directory
pub const LOG_DIR: &str = "logs";

/// Default device sample rate in Hz
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 30;

/// Default number of retained chart points (~20 minutes at 30 Hz)
pub const DEFAULT_HISTORY_LIMIT: usize = 36_000;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        StormError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            StormError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== Sections ====================

/// Chart display and retention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Maximum retained updates; unset keeps everything
    pub history_limit: Option<usize>,
    /// Visible time window in seconds when following the latest data
    pub time_window_secs: f64,
    pub show_legend: bool,
    pub line_width: f32,
    /// Always include zero on the Y axis
    pub include_zero: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            time_window_secs: 30.0,
            show_legend: true,
            line_width: 1.5,
            include_zero: true,
        }
    }
}

/// Toast notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// How long a toast stays visible, in seconds
    pub toast_secs: f64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { toast_secs: 4.0 }
    }
}

impl NotificationConfig {
    pub fn lifetime(&self) -> Duration {
        Duration::from_secs_f64(self.toast_secs.max(0.1))
    }
}

/// Simulated device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Port names the device announces
    pub ports: Vec<String>,
    /// Sensor update rate in Hz
    pub sample_rate_hz: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            ports: vec!["/dev/ttyACM0".to_string(), "/dev/ttyUSB0".to_string()],
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
        }
    }
}

impl DeviceConfig {
    /// Interval between sensor updates
    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.sample_rate_hz.clamp(1, 1000) as f64)
    }
}

/// Logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Also write daily rolling log files into the app data directory
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,storm_monitor=debug".to_string(),
            file: false,
        }
    }
}

// ==================== App Config ====================

/// Persistent application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub language: Language,
    pub chart: ChartConfig,
    pub notifications: NotificationConfig,
    pub device: DeviceConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the config from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = config_path().ok_or_else(|| {
            StormError::Config("Could not determine config path".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load a config file from an explicit path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            StormError::Config(format!("Failed to read config {:?}: {}", path, e))
        })?;

        toml::from_str(&content).map_err(|e| {
            StormError::Config(format!("Failed to parse config {:?}: {}", path, e))
        })
    }

    /// Save the config to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir().context("Failed to save config")?;
        self.save_to(dir.join(CONFIG_FILE))
    }

    /// Save the config to an explicit path
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StormError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| StormError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            StormError::Config(format!("Failed to write config {:?}: {}", path, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.language, Language::English);
        assert_eq!(config.chart.history_limit, Some(DEFAULT_HISTORY_LIMIT));
        assert_eq!(config.device.sample_rate_hz, 30);
        assert_eq!(config.notifications.lifetime(), Duration::from_secs(4));
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut config = AppConfig::default();
        config.language = Language::Russian;
        config.chart.time_window_secs = 90.0;
        config.device.ports = vec!["COM3".to_string()];
        config.logging.file = true;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[device]\nsample_rate_hz = 10\n").unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.device.sample_rate_hz, 10);
        assert_eq!(loaded.device.ports, DeviceConfig::default().ports);
        assert_eq!(loaded.chart, ChartConfig::default());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "chart = 5").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, StormError::Config(_)));
    }

    #[test]
    fn test_sample_interval() {
        let device = DeviceConfig {
            sample_rate_hz: 4,
            ..Default::default()
        };
        assert_eq!(device.sample_interval(), Duration::from_millis(250));
    }
}
