//! Stash containers as seen by the watchdog.

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, Position};

/// A quantity of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item short name (e.g. `"scrap"`).
    pub item: String,
    pub amount: u32,
}

impl ItemStack {
    pub fn new(item: impl Into<String>, amount: u32) -> Self {
        Self {
            item: item.into(),
            amount,
        }
    }
}

/// A hideable storage container.
///
/// The host creates and destroys stashes. The watchdog only reads `owner`
/// and `is_open`, and rewrites ownership, visibility, and contents when a
/// decoy is set up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stash {
    #[serde(default = "unowned")]
    pub owner: PlayerId,
    /// Already revealed; further discoveries are ignored.
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub inventory: Vec<ItemStack>,
}

fn unowned() -> PlayerId {
    PlayerId::UNOWNED
}

impl Stash {
    /// A freshly placed, closed stash.
    pub fn new(owner: impl Into<PlayerId>, position: Position) -> Self {
        Self {
            owner: owner.into(),
            is_open: false,
            hidden: false,
            position,
            inventory: Vec::new(),
        }
    }

    /// Whether the stash has no legitimate owner.
    #[inline]
    pub fn is_unowned(&self) -> bool {
        self.owner.is_unowned()
    }

    /// Turn this stash into a decoy: no owner, hidden, stocked with `items`.
    pub fn set_decoy(&mut self, items: Vec<ItemStack>) {
        self.owner = PlayerId::UNOWNED;
        self.hidden = true;
        self.inventory = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_decoy_clears_owner() {
        let mut stash = Stash::new(100, Position::default());
        assert!(!stash.is_unowned());

        stash.set_decoy(vec![ItemStack::new("scrap", 25)]);

        assert!(stash.is_unowned());
        assert!(stash.hidden);
        assert!(!stash.is_open);
        assert_eq!(stash.inventory, vec![ItemStack::new("scrap", 25)]);
    }

    #[test]
    fn test_missing_owner_deserializes_unowned() {
        let stash: Stash = serde_json::from_str(r#"{"is_open": true}"#).unwrap();
        assert!(stash.is_unowned());
        assert!(stash.is_open);
    }
}
