//! Opt-in registry for decoy placement.

use parking_lot::RwLock;
use std::collections::HashSet;
use tracing::{info, warn};

use super::persistence::ToggleStore;
use super::player::PlayerId;
use crate::error::ToggleError;

/// Players who opted in to having their placed stashes turned into decoys
/// (and receiving the placement confirmation).
///
/// Loaded once at startup and written through on every toggle. The only
/// mutation is [`ToggleRegistry::toggle`].
pub struct ToggleRegistry {
    players: RwLock<HashSet<PlayerId>>,
    store: Box<dyn ToggleStore>,
}

impl ToggleRegistry {
    /// Load the registry from `store`.
    pub fn open(store: impl ToggleStore + 'static) -> Result<Self, ToggleError> {
        let players = store.load()?;
        info!(count = players.len(), "Loaded stash toggles");
        Ok(Self {
            players: RwLock::new(players),
            store: Box::new(store),
        })
    }

    /// Flip `player`'s membership, persist it, and return the new state.
    ///
    /// If the write fails the in-memory set is left as it was.
    pub fn toggle(&self, player: PlayerId) -> Result<bool, ToggleError> {
        let mut players = self.players.write();
        let enabled = if players.remove(&player) {
            false
        } else {
            players.insert(player);
            true
        };

        if let Err(e) = self.store.save(&players) {
            warn!(player = %player, error = %e, "Failed to persist stash toggle, reverting");
            if enabled {
                players.remove(&player);
            } else {
                players.insert(player);
            }
            return Err(e);
        }

        Ok(enabled)
    }

    pub fn is_enabled(&self, player: PlayerId) -> bool {
        self.players.read().contains(&player)
    }

    pub fn len(&self) -> usize {
        self.players.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Store whose writes can be made to fail.
    #[derive(Default, Clone)]
    struct FlakyStore {
        fail: Arc<AtomicBool>,
        saved: Arc<parking_lot::Mutex<Option<HashSet<PlayerId>>>>,
    }

    impl ToggleStore for FlakyStore {
        fn load(&self) -> Result<HashSet<PlayerId>, ToggleError> {
            Ok(self.saved.lock().clone().unwrap_or_default())
        }

        fn save(&self, players: &HashSet<PlayerId>) -> Result<(), ToggleError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ToggleError::Io(std::io::Error::other("read-only")));
            }
            *self.saved.lock() = Some(players.clone());
            Ok(())
        }
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let registry = ToggleRegistry::open(FlakyStore::default()).unwrap();
        let player = PlayerId(100);

        assert!(!registry.is_enabled(player));
        assert!(registry.toggle(player).unwrap());
        assert!(registry.is_enabled(player));
        assert!(!registry.toggle(player).unwrap());
        assert!(!registry.is_enabled(player));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_every_toggle_is_written() {
        let store = FlakyStore::default();
        let registry = ToggleRegistry::open(store.clone()).unwrap();

        registry.toggle(PlayerId(1)).unwrap();
        registry.toggle(PlayerId(2)).unwrap();

        let saved = store.saved.lock().clone().unwrap();
        assert_eq!(saved.len(), 2);

        let reopened = ToggleRegistry::open(store).unwrap();
        assert!(reopened.is_enabled(PlayerId(1)));
        assert!(reopened.is_enabled(PlayerId(2)));
    }

    #[test]
    fn test_failed_write_reverts() {
        let store = FlakyStore::default();
        let registry = ToggleRegistry::open(store.clone()).unwrap();
        registry.toggle(PlayerId(5)).unwrap();

        store.fail.store(true, Ordering::SeqCst);
        assert!(registry.toggle(PlayerId(5)).is_err());
        assert!(registry.is_enabled(PlayerId(5)));
        assert!(registry.toggle(PlayerId(6)).is_err());
        assert!(!registry.is_enabled(PlayerId(6)));
        assert_eq!(registry.len(), 1);
    }
}
