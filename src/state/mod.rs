//! Player-facing state: identities, stashes, violation counters, opt-ins.

mod persistence;
mod player;
mod stash;
mod toggles;
mod tracker;

pub use persistence::{JsonFileStore, ToggleStore};
pub use player::{PlayerId, PlayerInfo, Position};
pub use stash::{ItemStack, Stash};
pub use toggles::ToggleRegistry;
pub use tracker::ViolationTracker;
