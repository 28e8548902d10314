//! Loot generation with diminishing returns.
//!
//! Each monster carries an ordered [`LootTable`]. On defeat a tier-wide drop
//! gate is rolled first; if it passes, entries are drawn in table order, and
//! every successful draw raises a cumulative penalty that scales down the
//! chance of the next entry:
//!
//! ```text
//! adjusted = base_chance * (1 - penalty)
//! ```
//!
//! Drawing stops at the tier cap. Medium and boss tiers guarantee one item when
//! the gate passed but nothing was drawn.

use crate::actor::MonsterTier;
use crate::item::Item;
use crate::rng::RollSource;

/// One possible drop and its base probability in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct LootEntry {
    pub item: Item,
    pub chance: f64,
}

/// Ordered drop table. Draw order is insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LootTable {
    entries: Vec<LootEntry>,
}

impl LootTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`LootTable::push`].
    pub fn with(mut self, item: Item, chance: f64) -> Self {
        self.push(item, chance);
        self
    }

    /// Appends an entry; the chance is clamped to `[0, 1]`.
    pub fn push(&mut self, item: Item, chance: f64) {
        self.entries.push(LootEntry {
            item,
            chance: chance.clamp(0.0, 1.0),
        });
    }

    pub fn entries(&self) -> &[LootEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tier-specific drop parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LootProfile {
    /// Probability that any loot is generated at all.
    pub gate: f64,
    /// Penalty added after each successful draw.
    pub penalty_step: f64,
    /// Maximum items dropped per defeat.
    pub cap: usize,
    /// Grant one random entry when the gate passed but no draw succeeded.
    pub guaranteed: bool,
}

impl LootProfile {
    pub const fn for_tier(tier: MonsterTier) -> Self {
        match tier {
            MonsterTier::Weak => Self {
                gate: 0.45,
                penalty_step: 0.25,
                cap: 3,
                guaranteed: false,
            },
            MonsterTier::Medium => Self {
                gate: 0.60,
                penalty_step: 0.20,
                cap: 4,
                guaranteed: true,
            },
            MonsterTier::Boss => Self {
                gate: 0.80,
                penalty_step: 0.15,
                cap: 5,
                guaranteed: true,
            },
        }
    }
}

/// Rolls `table` under `profile` and returns the dropped items in draw order.
pub fn generate_loot(
    table: &LootTable,
    profile: &LootProfile,
    rolls: &mut (impl RollSource + ?Sized),
) -> Vec<Item> {
    if table.is_empty() || !rolls.chance(profile.gate) {
        tracing::debug!(entries = table.len(), "loot gate closed");
        return Vec::new();
    }

    let mut dropped = Vec::new();
    let mut penalty = 0.0_f64;
    for entry in table.entries() {
        if dropped.len() >= profile.cap {
            break;
        }
        let adjusted = entry.chance * (1.0 - penalty);
        if rolls.chance(adjusted) {
            dropped.push(entry.item.clone());
            penalty = (penalty + profile.penalty_step).min(1.0);
        }
    }

    if dropped.is_empty() && profile.guaranteed && profile.cap > 0 {
        let index = rolls.pick(table.len());
        dropped.push(table.entries()[index].item.clone());
        tracing::debug!(index, "guaranteed drop granted");
    }

    tracing::debug!(count = dropped.len(), "loot generated");
    dropped
}
