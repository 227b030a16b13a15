//! Top-level webhook message.

use serde::{Deserialize, Serialize};

use crate::embed::Embed;

/// A message posted to a webhook endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookMessage {
    /// Name the message is posted under.
    pub username: String,
    /// Plain text body. Sent as an empty string when only embeds are used.
    #[serde(default)]
    pub content: String,
    /// Avatar shown next to the username.
    #[serde(default)]
    pub avatar_url: String,
    /// Rich embeds, rendered below the content.
    #[serde(default)]
    pub embeds: Vec<Embed>,
}

impl WebhookMessage {
    /// Create a message with the given username and no content.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            content: String::new(),
            avatar_url: String::new(),
            embeds: Vec::new(),
        }
    }

    /// Set the plain text body.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the avatar URL.
    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = url.into();
        self
    }

    /// Append an embed.
    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    /// The first embed, if any.
    pub fn embed(&self) -> Option<&Embed> {
        self.embeds.first()
    }

    /// Serialize to the JSON document sent over the wire.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let message = WebhookMessage::new("Stash Warn")
            .with_avatar("https://example.com/a.png")
            .with_embed(
                Embed::new("Stash Uncovered!")
                    .with_description("bob uncovered a stash")
                    .with_image("https://example.com/i.png")
                    .with_color(65535)
                    .with_field("Violations", "1"),
            );

        let value: serde_json::Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "username": "Stash Warn",
                "content": "",
                "avatar_url": "https://example.com/a.png",
                "embeds": [{
                    "title": "Stash Uncovered!",
                    "description": "bob uncovered a stash",
                    "image": { "url": "https://example.com/i.png" },
                    "color": 65535,
                    "fields": [{ "name": "Violations", "value": "1", "inline": false }]
                }]
            })
        );
    }

    #[test]
    fn test_embed_accessor() {
        assert!(WebhookMessage::new("x").embed().is_none());
        let message = WebhookMessage::new("x").with_embed(Embed::new("first"));
        assert_eq!(message.embed().map(|e| e.title.as_str()), Some("first"));
    }
}
