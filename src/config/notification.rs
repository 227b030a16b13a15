//! Webhook notification configuration.

use serde::Deserialize;

/// Where violation alerts go and how they look.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Webhook endpoint. Empty disables delivery.
    #[serde(default)]
    pub webhook_url: String,
    /// Name the alert is posted under.
    #[serde(default = "default_username")]
    pub username: String,
    /// Embed title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Embed description. `{0}` is replaced by the suspect's name.
    #[serde(default = "default_description")]
    pub description: String,
    /// Embed image URL.
    #[serde(default = "default_image")]
    pub image: String,
    /// Avatar URL for the posting user.
    #[serde(default = "default_avatar")]
    pub avatar: String,
    /// Embed color as `0xRRGGBB` (default: 65535, cyan).
    /// Out-of-range values are clamped when the embed is built.
    #[serde(default = "default_color")]
    pub color: i64,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            username: default_username(),
            title: default_title(),
            description: default_description(),
            image: default_image(),
            avatar: default_avatar(),
            color: default_color(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl NotificationConfig {
    pub fn delivery_enabled(&self) -> bool {
        !self.webhook_url.trim().is_empty()
    }
}

fn default_username() -> String {
    "Stash Warn".to_string()
}

fn default_title() -> String {
    "Stash Uncovered!".to_string()
}

fn default_description() -> String {
    "Pst!, {0} uncovered a stash check it out.".to_string()
}

fn default_image() -> String {
    "https://cdn.discordapp.com/attachments/598270871806803982/760249104675766282/419.png"
        .to_string()
}

fn default_avatar() -> String {
    "https://cdn.discordapp.com/attachments/598270871806803982/760248934474973234/310.png"
        .to_string()
}

fn default_color() -> i64 {
    65535
}

fn default_request_timeout() -> u64 {
    10
}
