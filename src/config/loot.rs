//! Decoy loot table configuration.

use serde::Deserialize;

/// Items drawn into a decoy stash when it is placed.
#[derive(Debug, Clone, Deserialize)]
pub struct LootConfig {
    /// Independent draws per decoy (default: 3).
    #[serde(default = "default_draws")]
    pub draws: usize,
    /// Candidate items; each draw picks one uniformly.
    #[serde(default = "default_entries")]
    pub entries: Vec<LootEntry>,
}

/// One candidate item with an inclusive amount range.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LootEntry {
    /// Item short name.
    pub item: String,
    #[serde(default = "default_amount")]
    pub min: u32,
    #[serde(default = "default_amount")]
    pub max: u32,
}

impl LootEntry {
    pub fn new(item: impl Into<String>, min: u32, max: u32) -> Self {
        Self {
            item: item.into(),
            min,
            max,
        }
    }
}

impl Default for LootConfig {
    fn default() -> Self {
        Self {
            draws: default_draws(),
            entries: default_entries(),
        }
    }
}

fn default_draws() -> usize {
    3
}

fn default_amount() -> u32 {
    1
}

fn default_entries() -> Vec<LootEntry> {
    vec![
        LootEntry::new("scrap", 25, 100),
        LootEntry::new("metal.fragments", 100, 500),
        LootEntry::new("lowgradefuel", 20, 60),
        LootEntry::new("ammo.rifle", 16, 64),
    ]
}
