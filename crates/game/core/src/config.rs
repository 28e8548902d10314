//! Game configuration constants and tunable balance parameters.
//!
//! Every probability and growth curve used by the rules lives here so that
//! content files can rebalance the game and tests can pin randomness down
//! (e.g. a zero critical chance or a `[1.0, 1.0]` variance band).

/// Top-level configuration bundle consumed by [`crate::GameSession`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub combat: CombatRules,
    pub progression: ProgressionRules,
    pub rest: RestRules,
    /// Inventory capacity given to freshly created players.
    pub inventory_size: usize,
}

impl GameConfig {
    pub const DEFAULT_INVENTORY_SIZE: usize = 20;

    pub fn new() -> Self {
        Self {
            combat: CombatRules::default(),
            progression: ProgressionRules::default(),
            rest: RestRules::default(),
            inventory_size: Self::DEFAULT_INVENTORY_SIZE,
        }
    }

    pub fn with_combat(mut self, combat: CombatRules) -> Self {
        self.combat = combat;
        self
    }

    pub fn with_progression(mut self, progression: ProgressionRules) -> Self {
        self.progression = progression;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Closed interval a damage roll is scaled by.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarianceBand {
    pub min: f64,
    pub max: f64,
}

impl VarianceBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A band that always yields exactly `1.0`.
    pub const fn fixed() -> Self {
        Self { min: 1.0, max: 1.0 }
    }
}

/// Balance parameters of the damage model, magic, defend and flee.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatRules {
    /// Player damage multiplier gained per level above 1.
    pub player_level_scaling: f64,
    /// Flat damage a monster adds per level.
    pub monster_damage_per_level: u32,
    pub player_variance: VarianceBand,
    pub monster_variance: VarianceBand,
    pub crit_chance: f64,
    pub crit_multiplier: u32,
    /// Dodge chance gained per level the defender has over the attacker.
    pub dodge_per_level: f64,
    pub dodge_cap: f64,
    pub magic_mana_cost: u32,
    pub magic_multiplier: f64,
    pub flee_base_chance: f64,
    /// Flee chance lost when the opponent has more health than the player.
    pub flee_penalty: f64,
    /// Fraction of the next incoming hit absorbed after a defend action.
    pub defend_reduction: f64,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            player_level_scaling: 0.1,
            monster_damage_per_level: 2,
            player_variance: VarianceBand::new(0.9, 1.1),
            monster_variance: VarianceBand::new(0.85, 1.15),
            crit_chance: 0.10,
            crit_multiplier: 2,
            dodge_per_level: 0.05,
            dodge_cap: 0.30,
            magic_mana_cost: 20,
            magic_multiplier: 1.5,
            flee_base_chance: 0.5,
            flee_penalty: 0.2,
            defend_reduction: 0.5,
        }
    }
}

impl CombatRules {
    /// Rules with every random element pinned: no variance, no critical hits.
    ///
    /// Dodge still depends on the level gap, so equal levels never dodge.
    pub fn deterministic() -> Self {
        Self {
            player_variance: VarianceBand::fixed(),
            monster_variance: VarianceBand::fixed(),
            crit_chance: 0.0,
            ..Self::default()
        }
    }
}

/// Experience curve and passive mana growth.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionRules {
    pub starting_threshold: u32,
    pub threshold_growth: f64,
    /// Successful mana spends needed before max mana grows.
    pub mana_growth_uses: u32,
    pub mana_growth_ratio: f64,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            starting_threshold: 25,
            threshold_growth: 1.5,
            mana_growth_uses: 50,
            mana_growth_ratio: 0.02,
        }
    }
}

/// Defaults for rest rooms built without explicit amounts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RestRules {
    pub heal_amount: u32,
    pub mana_restore: u32,
}

impl Default for RestRules {
    fn default() -> Self {
        Self {
            heal_amount: 50,
            mana_restore: 30,
        }
    }
}
