//! Creatures that take part in combat.
//!
//! # Architecture
//!
//! - [`Player`]: the single player character, with optional mana, experience
//!   and a bounded inventory
//! - [`Monster`]: room inhabitants with a tier, an experience reward and a
//!   private loot table
//! - [`Combatant`]: the view of either side the damage model works with

pub mod monster;
pub mod player;

pub use monster::{Monster, MonsterTier};
pub use player::{Archetype, ItemUse, Player};

use crate::stats::CreatureStats;

/// Which side of the damage formula a creature uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatRole {
    Player,
    Monster,
}

/// Anything that can attack or be attacked.
pub trait Combatant {
    fn stats(&self) -> &CreatureStats;

    fn stats_mut(&mut self) -> &mut CreatureStats;

    fn role(&self) -> CombatRole;

    fn name(&self) -> &str {
        self.stats().name()
    }

    fn level(&self) -> u32 {
        self.stats().level()
    }

    fn is_alive(&self) -> bool {
        self.stats().is_alive()
    }

    /// Attack power including any equipment bonus.
    fn effective_attack(&self) -> u32 {
        self.stats().attack_power()
    }

    /// Defense including any equipment bonus.
    fn effective_defense(&self) -> u32 {
        self.stats().defense()
    }
}
