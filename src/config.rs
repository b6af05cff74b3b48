//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application
//! configuration in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the config directory (test isolation).
pub const CONFIG_DIR_ENV: &str = "STOREFRONT_CONFIG_DIR";

/// Environment variable overriding the data directory (test isolation).
pub const DATA_DIR_ENV: &str = "STOREFRONT_DATA_DIR";

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Data directory holding the cart file and order receipts.
    /// When unset, the platform data directory is used.
    pub data_dir: Option<PathBuf>,
}

/// Display preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Currency symbol prefixed to formatted amounts
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Storefront/config.toml`
/// - macOS: `~/Library/Application Support/Storefront/config.toml`
/// - Windows: `%APPDATA%\Storefront\config.toml`
///
/// `STOREFRONT_CONFIG_DIR` overrides the directory for tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Display preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("Storefront");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolves the data directory holding the cart file and order receipts.
    ///
    /// Resolution order: `STOREFRONT_DATA_DIR`, then the configured
    /// `paths.data_dir`, then the platform data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        if let Some(dir) = &self.paths.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .context("Failed to determine data directory")?
            .join("Storefront");

        Ok(data_dir)
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `data_dir`, if set, has an existing parent (the directory itself is
    ///   created on first write)
    /// - `currency` is non-empty
    pub fn validate(&self) -> Result<()> {
        if let Some(data_dir) = &self.paths.data_dir {
            if let Some(parent) = data_dir.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    anyhow::bail!(
                        "Data directory parent does not exist: {}",
                        parent.display()
                    );
                }
            }
        }

        if self.ui.currency.is_empty() {
            anyhow::bail!("Currency symbol cannot be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.ui.currency, "$");
        assert!(config.paths.data_dir.is_none());
    }

    #[test]
    fn test_validate_rejects_empty_currency() {
        let config = Config {
            ui: UiConfig {
                currency: String::new(),
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            paths: PathConfig {
                data_dir: Some(PathBuf::from("/tmp")),
            },
            ui: UiConfig {
                currency: "€".to_string(),
            },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[paths]\n").unwrap();
        assert_eq!(config.ui.currency, "$");
    }

    #[test]
    fn test_configured_data_dir_wins_over_platform_default() {
        let config = Config {
            paths: PathConfig {
                data_dir: Some(PathBuf::from("/tmp/storefront-test")),
            },
            ..Config::default()
        };

        // Only meaningful when the env override is not set in this process.
        if std::env::var(DATA_DIR_ENV).is_err() {
            assert_eq!(
                config.data_dir().unwrap(),
                PathBuf::from("/tmp/storefront-test")
            );
        }
    }
}
