//! Room inhabitants.

use crate::inventory::Inventory;
use crate::item::Item;
use crate::loot::{LootProfile, LootTable, generate_loot};
use crate::rng::RollSource;
use crate::stats::CreatureStats;

use super::{CombatRole, Combatant};

/// Relative strength class; drives loot parameters.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MonsterTier {
    Weak,
    Medium,
    Boss,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Monster {
    stats: CreatureStats,
    species: String,
    tier: MonsterTier,
    experience_reward: u32,
    loot_table: LootTable,
    /// Items dropped on defeat, waiting to be moved to the room floor.
    loot: Inventory,
    spoils_claimed: bool,
}

impl Monster {
    pub fn new(
        species: impl Into<String>,
        stats: CreatureStats,
        tier: MonsterTier,
        experience_reward: u32,
    ) -> Self {
        Self {
            stats,
            species: species.into(),
            tier,
            experience_reward,
            loot_table: LootTable::new(),
            loot: Inventory::new(LootProfile::for_tier(tier).cap),
            spoils_claimed: false,
        }
    }

    pub fn with_loot_table(mut self, table: LootTable) -> Self {
        self.loot_table = table;
        self
    }

    /// Type tag the creature was built from (e.g. `goblin`).
    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn tier(&self) -> MonsterTier {
        self.tier
    }

    pub fn experience_reward(&self) -> u32 {
        self.experience_reward
    }

    pub fn loot_table(&self) -> &LootTable {
        &self.loot_table
    }

    pub fn loot(&self) -> &Inventory {
        &self.loot
    }

    /// True once the victory rewards for this monster were handed out.
    pub fn spoils_claimed(&self) -> bool {
        self.spoils_claimed
    }

    /// Rolls this monster's loot table into its holding area.
    ///
    /// Returns the number of items dropped.
    pub fn drop_loot(&mut self, rolls: &mut (impl RollSource + ?Sized)) -> usize {
        let profile = LootProfile::for_tier(self.tier);
        let mut dropped = 0;
        for item in generate_loot(&self.loot_table, &profile, rolls) {
            match self.loot.add(item) {
                Ok(()) => dropped += 1,
                Err(err) => tracing::warn!(%err, monster = self.stats.name(), "loot discarded"),
            }
        }
        dropped
    }

    /// Marks the rewards as handed out and yields the dropped items.
    pub fn claim_spoils(&mut self) -> Vec<Item> {
        self.spoils_claimed = true;
        self.loot.take_all()
    }
}

impl Combatant for Monster {
    fn stats(&self) -> &CreatureStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut CreatureStats {
        &mut self.stats
    }

    fn role(&self) -> CombatRole {
        CombatRole::Monster
    }
}
