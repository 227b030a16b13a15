//! # stashwarn-webhook
//!
//! Wire model for chat webhook messages carrying rich embeds, in the JSON
//! shape accepted by Discord-compatible webhook endpoints:
//!
//! ```json
//! {
//!   "username": "Stash Warn",
//!   "content": "",
//!   "avatar_url": "https://example.com/avatar.png",
//!   "embeds": [{
//!     "title": "Stash Uncovered!",
//!     "description": "...",
//!     "image": { "url": "https://example.com/image.png" },
//!     "color": 65535,
//!     "fields": [{ "name": "Owner", "value": "...", "inline": false }]
//!   }]
//! }
//! ```
//!
//! Values are immutable once built: every `with_*` call consumes the value
//! and returns the extended one.
//!
//! ```rust
//! use stashwarn_webhook::{Embed, WebhookMessage};
//!
//! let embed = Embed::new("Stash Uncovered!")
//!     .with_color(0x00FFFF)
//!     .with_field("Owner", "Server Placed");
//! let message = WebhookMessage::new("Stash Warn").with_embed(embed);
//! assert!(message.to_json().unwrap().contains("\"Server Placed\""));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod embed;
mod message;

pub use embed::{clamp_color, Embed, EmbedField, EmbedImage, COLOR_MAX};
pub use message::WebhookMessage;
