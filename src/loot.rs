//! Decoy stash loot sampling.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::{LootConfig, LootEntry};
use crate::state::ItemStack;

/// Uniform loot table: every draw picks one entry with equal probability,
/// then an amount uniformly from the entry's inclusive range.
#[derive(Debug, Clone, Default)]
pub struct LootTable {
    draws: usize,
    entries: Vec<LootEntry>,
}

impl LootTable {
    pub fn new(draws: usize, entries: Vec<LootEntry>) -> Self {
        Self { draws, entries }
    }

    pub fn from_config(config: &LootConfig) -> Self {
        Self::new(config.draws, config.entries.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.draws == 0 || self.entries.is_empty()
    }

    /// Roll a fresh inventory. Draws are independent, so the same item may
    /// appear more than once.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<ItemStack> {
        let mut items = Vec::with_capacity(self.draws);
        if self.entries.is_empty() {
            return items;
        }

        for _ in 0..self.draws {
            let Some(entry) = self.entries.choose(rng) else {
                break;
            };
            let (lo, hi) = if entry.min <= entry.max {
                (entry.min, entry.max)
            } else {
                (entry.max, entry.min)
            };
            let amount = rng.gen_range(lo..=hi).max(1);
            items.push(ItemStack::new(entry.item.clone(), amount));
        }
        items
    }
}
