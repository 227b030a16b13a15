//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("notification.webhook_url is not a valid URL: {0}")]
    InvalidWebhookUrl(String),
    #[error("notification.webhook_url must use http or https, got '{0}'")]
    UnsupportedWebhookScheme(String),
    #[error("notification.request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,
    #[error("loot.entries[{0}] has an empty item name")]
    EmptyLootItem(usize),
    #[error("stash_item is required")]
    MissingStashItem,
    #[error("toggles.path parent directory does not exist: {0}")]
    TogglePathInvalid(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Webhook destination (empty means delivery is disabled)
    let notification = &config.notification;
    if notification.delivery_enabled() {
        match reqwest::Url::parse(notification.webhook_url.trim()) {
            Ok(url) if !matches!(url.scheme(), "http" | "https") => {
                errors.push(ValidationError::UnsupportedWebhookScheme(
                    url.scheme().to_string(),
                ));
            }
            Ok(_) => {}
            Err(e) => errors.push(ValidationError::InvalidWebhookUrl(e.to_string())),
        }
    }
    if notification.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    // Loot table
    for (index, entry) in config.loot.entries.iter().enumerate() {
        if entry.item.trim().is_empty() {
            errors.push(ValidationError::EmptyLootItem(index));
        }
    }

    if config.stash_item.trim().is_empty() {
        errors.push(ValidationError::MissingStashItem);
    }

    // Toggle record path
    if let Some(parent) = config.toggles.path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        errors.push(ValidationError::TogglePathInvalid(
            config.toggles.path.display().to_string(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LootEntry;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate(&Config::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = Config::default();
        config.notification.webhook_url = "ftp://example.com/hook".to_string();
        config.notification.request_timeout_secs = 0;
        config.loot.entries.push(LootEntry::new(" ", 1, 1));
        config.stash_item.clear();
        config.toggles.path = "/definitely/not/here/toggles.json".into();

        let errors = validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnsupportedWebhookScheme("ftp".to_string()),
                ValidationError::ZeroRequestTimeout,
                ValidationError::EmptyLootItem(4),
                ValidationError::MissingStashItem,
                ValidationError::TogglePathInvalid("/definitely/not/here/toggles.json".to_string()),
            ]
        );
    }

    #[test]
    fn test_unparseable_webhook_url() {
        let mut config = Config::default();
        config.notification.webhook_url = "not a url".to_string();

        let errors = validate(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidWebhookUrl(_)));
    }
}
