//! stashwarn - hidden stash discovery watchdog.
//!
//! When a player uncovers a buried stash that belongs to someone they are not
//! affiliated with, the uncover is counted as a violation and an embed alert
//! is queued for a Discord-style webhook. Opted-in players can also turn the
//! stashes they place into server-owned decoys.
//!
//! The game server is reached only through [`host::Host`] and the optional
//! group providers in [`auth`]; everything else lives here.

pub mod auth;
pub mod commands;
pub mod config;
pub mod delivery;
pub mod dispatcher;
pub mod error;
pub mod host;
pub mod http;
pub mod loot;
pub mod metrics;
pub mod notify;
pub mod replay;
pub mod state;
pub mod telemetry;

pub use auth::{Affiliation, AuthorizationResolver, EnabledChecks};
pub use commands::CommandOutcome;
pub use config::Config;
pub use delivery::{DeliveryGateway, HttpTransport, NullGateway, WebhookGateway, WebhookTransport};
pub use dispatcher::{PlacementOutcome, StashWarn, UncoverOutcome};
pub use state::{PlayerId, PlayerInfo, Position, Stash};
