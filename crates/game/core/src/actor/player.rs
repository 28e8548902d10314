//! The player character.

use crate::config::{GameConfig, ProgressionRules};
use crate::inventory::{Inventory, InventoryError};
use crate::item::Item;
use crate::stats::mana::ManaSpent;
use crate::stats::{CreatureStats, LevelUp, ManaPool, Progression};

use super::{CombatRole, Combatant};

/// Starting class.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Archetype {
    /// 120 HP, 15 attack, 10 defense, no mana.
    #[strum(to_string = "warrior", serialize = "guerrier")]
    Warrior,
    /// 80 HP, 10 attack, 100 mana.
    #[strum(serialize = "mage")]
    Mage,
}

impl Archetype {
    pub const STARTING_POTIONS: usize = 2;

    /// Creates a player of this class carrying the starting kit.
    pub fn create(self, name: impl Into<String>, config: &GameConfig) -> Player {
        let mut player = match self {
            Self::Warrior => Player::warrior(name, config),
            Self::Mage => Player::mage(name, config),
        };
        for _ in 0..Self::STARTING_POTIONS {
            let potion = Item::potion("Healing Potion", "Restores 30 HP", 30);
            if let Err(err) = player.inventory.add(potion) {
                tracing::warn!(%err, "starting potion did not fit");
            }
        }
        player
    }
}

/// What happened when an inventory item was used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemUse {
    Healed { item: String, amount: u32 },
    Equipped { item: String },
    Unequipped { item: String },
    Inspected { item: String, quantity: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    stats: CreatureStats,
    mana: Option<ManaPool>,
    progression: Progression,
    inventory: Inventory,
}

impl Player {
    pub fn new(
        stats: CreatureStats,
        mana: Option<ManaPool>,
        progression: Progression,
        inventory: Inventory,
    ) -> Self {
        Self {
            stats,
            mana,
            progression,
            inventory,
        }
    }

    pub fn warrior(name: impl Into<String>, config: &GameConfig) -> Self {
        Self::new(
            CreatureStats::new(name, 120, 15).with_defense(10),
            None,
            Progression::new(&config.progression),
            Inventory::new(config.inventory_size),
        )
    }

    pub fn mage(name: impl Into<String>, config: &GameConfig) -> Self {
        Self::new(
            CreatureStats::new(name, 80, 10),
            Some(ManaPool::new(100)),
            Progression::new(&config.progression),
            Inventory::new(config.inventory_size),
        )
    }

    pub fn mana(&self) -> Option<&ManaPool> {
        self.mana.as_ref()
    }

    pub fn mana_mut(&mut self) -> Option<&mut ManaPool> {
        self.mana.as_mut()
    }

    pub fn has_mana(&self) -> bool {
        self.mana.is_some()
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Spends mana; `None` if the player has no pool or too little mana.
    pub fn use_mana(&mut self, amount: u32, rules: &ProgressionRules) -> Option<ManaSpent> {
        self.mana.as_mut()?.spend(amount, rules)
    }

    /// Adds experience and resolves every level-up it pays for.
    ///
    /// Each level raises max health by `10 + 2L` and fully heals, raises
    /// attack by `3 + L`, and for casters raises max mana by `10 + 3L` with a
    /// full refill.
    pub fn gain_experience(&mut self, xp: u32, rules: &ProgressionRules) -> Vec<LevelUp> {
        self.progression.add(xp);

        let mut gained = Vec::new();
        while self.progression.take_level(rules) {
            let level = self.stats.level() + 1;
            let gains = LevelUp::for_level(level, self.mana.is_some());

            self.stats.set_level(level);
            self.stats
                .set_max_health(self.stats.max_health() + gains.health_gain);
            self.stats.restore();
            self.stats
                .set_attack_power(self.stats.attack_power() + gains.attack_gain);
            if let (Some(pool), Some(increase)) = (self.mana.as_mut(), gains.mana_gain) {
                pool.grow(increase);
            }

            tracing::info!(
                level,
                max_health = self.stats.max_health(),
                attack = self.stats.attack_power(),
                "player levelled up"
            );
            gained.push(gains);
        }
        gained
    }

    /// Uses the item in `index`.
    ///
    /// Potions heal and are removed; weapons and armor toggle their equipped
    /// flag; materials are only inspected.
    pub fn use_item(&mut self, index: usize) -> Result<ItemUse, InventoryError> {
        let item = self.inventory.get_mut(index)?;
        match item {
            Item::Potion(potion) => {
                if potion.consumed {
                    return Err(InventoryError::NotUsable {
                        name: potion.name.clone(),
                        reason: "already consumed",
                    });
                }
                if !self.stats.is_alive() {
                    return Err(InventoryError::NotUsable {
                        name: potion.name.clone(),
                        reason: "cannot heal the dead",
                    });
                }
                potion.consumed = true;
                let name = potion.name.clone();
                let heal = potion.heal_amount;
                let amount = self.stats.heal(heal);
                self.inventory.remove(index)?;
                Ok(ItemUse::Healed { item: name, amount })
            }
            Item::Weapon(_) | Item::Armor(_) => {
                let name = item.name().to_owned();
                if self.inventory.toggle_equipped(index)? {
                    Ok(ItemUse::Equipped { item: name })
                } else {
                    Ok(ItemUse::Unequipped { item: name })
                }
            }
            Item::Material(material) => Ok(ItemUse::Inspected {
                item: material.name.clone(),
                quantity: material.quantity,
            }),
        }
    }
}

impl Combatant for Player {
    fn stats(&self) -> &CreatureStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut CreatureStats {
        &mut self.stats
    }

    fn role(&self) -> CombatRole {
        CombatRole::Player
    }

    fn effective_attack(&self) -> u32 {
        self.stats.attack_power() + self.inventory.damage_bonus()
    }

    fn effective_defense(&self) -> u32 {
        self.stats.defense() + self.inventory.defense_bonus()
    }
}
