//! Embed blocks attached to a webhook message.

use serde::{Deserialize, Serialize};

/// Largest color value an embed accepts (`0xRRGGBB`).
pub const COLOR_MAX: u32 = 0xFF_FF_FF;

/// Clamp an arbitrary configured color into the 24-bit RGB range.
pub fn clamp_color(value: i64) -> u32 {
    value.clamp(0, i64::from(COLOR_MAX)) as u32
}

/// A single rich embed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    /// Bold heading line.
    pub title: String,
    /// Body text under the title.
    #[serde(default)]
    pub description: String,
    /// Large image rendered beneath the body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    /// Sidebar color, `0xRRGGBB`.
    #[serde(default)]
    pub color: u32,
    /// Name/value rows, rendered in order.
    #[serde(default)]
    pub fields: Vec<EmbedField>,
}

/// Image reference inside an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedImage {
    /// Absolute URL of the image.
    pub url: String,
}

/// One name/value row of an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    /// Row label.
    pub name: String,
    /// Row content.
    pub value: String,
    /// Render side by side with neighbouring inline fields.
    #[serde(default)]
    pub inline: bool,
}

impl EmbedField {
    /// A full-width field.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }

    /// A field rendered inline with its neighbours.
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            inline: true,
            ..Self::new(name, value)
        }
    }
}

impl Embed {
    /// Create an embed with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            image: None,
            color: 0,
            fields: Vec::new(),
        }
    }

    /// Set the body text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image URL. An empty URL leaves the embed without an image.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.image = if url.is_empty() {
            None
        } else {
            Some(EmbedImage { url })
        };
        self
    }

    /// Set the sidebar color, clamped to 24 bits.
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color.min(COLOR_MAX);
        self
    }

    /// Append a full-width field.
    pub fn with_field(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_embed_field(EmbedField::new(name, value))
    }

    /// Append a prepared field.
    pub fn with_embed_field(mut self, field: EmbedField) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up the value of the first field with the given name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}
