//! Host environment boundary.
//!
//! The game server owns players, permissions, chat, and inventories. The
//! watchdog reaches them only through [`Host`].

mod world;

pub use world::{World, WorldError, WorldFile, WorldPlayer};

use crate::state::{PlayerId, PlayerInfo};

/// Exempts the holder from ever being flagged as a suspect.
pub const PERM_IGNORE: &str = "stashwarn.ignore";

/// Allows the stash command and decoy placement.
pub const PERM_USE: &str = "stashwarn.use";

/// Services the watchdog consumes from the game server.
///
/// Every call is a synchronous in-memory lookup or a queued side effect on
/// the host; none may block on network I/O.
pub trait Host: Send + Sync {
    /// Resolve a currently loaded player. Offline or unknown ids are `None`.
    fn find_player(&self, id: PlayerId) -> Option<PlayerInfo>;

    fn has_permission(&self, id: PlayerId, permission: &str) -> bool;

    /// Send a chat line to one player.
    fn send_message(&self, id: PlayerId, text: &str);

    /// Put `amount` of `item` into the player's inventory. `false` if the
    /// host could not do it.
    fn give_item(&self, id: PlayerId, item: &str, amount: u32) -> bool;
}
