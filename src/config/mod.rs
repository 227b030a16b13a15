//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level config struct, loading, and toggle storage settings
//! - [`notification`]: Webhook destination and embed appearance
//! - [`loot`]: Decoy loot table
//! - [`messages`]: Player-facing chat replies
//! - [`validation`]: Startup checks

mod loot;
mod messages;
mod notification;
mod types;
pub mod validation;

pub use loot::{LootConfig, LootEntry};
pub use messages::{MessagesConfig, format_reply};
pub use notification::NotificationConfig;
pub use types::{Config, ConfigError, ToggleConfig, default_true};
