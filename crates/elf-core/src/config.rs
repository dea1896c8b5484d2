//! Configuration types.
//!
//! Client settings live in `<config_dir>/file-elf/client.toml`. Every field has
//! a default, so a missing file (or a partial one) is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::notification::DEFAULT_DISMISS_MS;

/// Runtime configuration for the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Search service connection.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Notification behavior.
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// External editor used by "open in editor".
    #[serde(default)]
    pub editor: EditorConfig,

    /// Backend-side settings the client needs to know about.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
}

/// Search service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the local search service.
    pub endpoint: String,

    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Timeout for smart search, which walks hot directories on the
    /// backend before answering.
    pub hot_search_timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:6789/file_elf".to_string(),
            timeout_ms: 5000,
            hot_search_timeout_ms: 60_000,
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn hot_search_timeout(&self) -> Duration {
        Duration::from_millis(self.hot_search_timeout_ms)
    }
}

/// Notification configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Delay before a notification hides itself.
    pub dismiss_after_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: DEFAULT_DISMISS_MS,
        }
    }
}

impl NotificationConfig {
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }
}

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Executable launched with the path as its only argument.
    pub command: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: "code".to_string(),
        }
    }
}

/// Backend-side settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend configuration file opened by the config action.
    pub config_file: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            config_file: "base.toml".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset, e.g. "info".
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load from the default location, falling back to defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&path)
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse TOML contents and validate them.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.service.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "service.endpoint",
                message: "must not be empty".to_string(),
            });
        }
        if self.editor.command.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "editor.command",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("file-elf"))
}

/// Get the path to client.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("client.toml"))
}
