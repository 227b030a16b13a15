//! Core configuration types and loading.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::loot::LootConfig;
use super::messages::MessagesConfig;
use super::notification::NotificationConfig;
use crate::auth::EnabledChecks;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Watchdog configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Webhook destination and embed appearance.
    #[serde(default)]
    pub notification: NotificationConfig,
    /// Which affiliation checks exempt a discoverer.
    #[serde(default)]
    pub checks: EnabledChecks,
    /// Where the opt-in list is stored.
    #[serde(default)]
    pub toggles: ToggleConfig,
    /// Items placed into decoy stashes.
    #[serde(default)]
    pub loot: LootConfig,
    /// Chat replies sent to players.
    #[serde(default)]
    pub messages: MessagesConfig,
    /// Item handed out by the stash command (default: "stash.small").
    #[serde(default = "default_stash_item")]
    pub stash_item: String,
    /// Prometheus metrics HTTP port. Metrics are not served when unset.
    pub metrics_port: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notification: NotificationConfig::default(),
            checks: EnabledChecks::default(),
            toggles: ToggleConfig::default(),
            loot: LootConfig::default(),
            messages: MessagesConfig::default(),
            stash_item: default_stash_item(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

/// Opt-in list storage.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleConfig {
    /// JSON file holding opted-in player ids (default: "stashwarn_toggles.json").
    #[serde(default = "default_toggle_path")]
    pub path: PathBuf,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            path: default_toggle_path(),
        }
    }
}

pub fn default_true() -> bool {
    true
}

fn default_stash_item() -> String {
    "stash.small".to_string()
}

fn default_toggle_path() -> PathBuf {
    PathBuf::from("stashwarn_toggles.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.stash_item, "stash.small");
        assert_eq!(config.checks, EnabledChecks::all());
        assert_eq!(config.toggles.path, PathBuf::from("stashwarn_toggles.json"));
        assert_eq!(config.notification.username, "Stash Warn");
        assert!(config.metrics_port.is_none());
    }

    #[test]
    fn test_partial_checks_table() {
        let config = Config::parse(
            r#"
            metrics_port = 9100

            [checks]
            clan = false
            "#,
        )
        .unwrap();

        assert!(config.checks.team);
        assert!(!config.checks.clan);
        assert!(config.checks.friend);
        assert_eq!(config.metrics_port, Some(9100));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = Config::parse("[checks\nteam = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::load("/nonexistent/stashwarn.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
