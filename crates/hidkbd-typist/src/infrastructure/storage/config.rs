//! TOML-based configuration for the typist.
//!
//! Reads and writes [`TypistConfig`] to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\hidkbd\config.toml`
//! - Linux:    `$XDG_CONFIG_HOME/hidkbd/config.toml` or `~/.config/hidkbd/config.toml`
//! - macOS:    `~/Library/Application Support/hidkbd/config.toml`
//!
//! Example file:
//!
//! ```toml
//! [device]
//! path = "/dev/hidg0"
//!
//! [typing]
//! key_interval_ms = 15
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every field carries a `#[serde(default = ...)]`, so a missing section or a
//! file written by an older version still loads.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::report_session::{SessionConfig, DEFAULT_KEY_INTERVAL};
use crate::infrastructure::transmitter::hidg::DEFAULT_HIDG_DEVICE;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TypistConfig {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub typing: TypingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where reports are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    /// HID gadget character device.
    #[serde(default = "default_device_path")]
    pub path: PathBuf,
}

/// Key pacing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypingConfig {
    /// Hold time after each press and each release, in milliseconds.
    #[serde(default = "default_key_interval_ms")]
    pub key_interval_ms: u64,
}

/// Log output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_device_path() -> PathBuf {
    PathBuf::from(DEFAULT_HIDG_DEVICE)
}
fn default_key_interval_ms() -> u64 {
    DEFAULT_KEY_INTERVAL.as_millis() as u64
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: default_device_path(),
        }
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            key_interval_ms: default_key_interval_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TypistConfig {
    /// The session parameters described by this config.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::with_key_interval(Duration::from_millis(self.typing.key_interval_ms))
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the full path to the config file in the platform config directory.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads [`TypistConfig`] from `path`, or from [`config_file_path`] when `path`
/// is `None`.  A missing file yields `TypistConfig::default()`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: Option<&Path>) -> Result<TypistConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_file_path()?,
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(TypistConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &TypistConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config directory including the `hidkbd` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("hidkbd"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("hidkbd"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("hidkbd")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
