//! Persisted form of the player.
//!
//! [`PlayerDocument`] mirrors every player attribute as a flat, snake_case
//! object. Converting a document back into a [`Player`] validates it as a
//! whole and never touches an existing player, so a bad save can be rejected
//! without side effects.

use crate::actor::{Combatant, Player};
use crate::error::{ErrorSeverity, GameError};
use crate::inventory::Inventory;
use crate::item::Item;
use crate::stats::{CreatureStats, ManaPool, Progression};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerDocument {
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub attack_power: u32,
    pub defense: u32,
    pub level: u32,
    pub mana: Option<u32>,
    pub max_mana: Option<u32>,
    pub has_mana: bool,
    pub experience: u32,
    pub experience_to_next_level: u32,
    pub mana_usage_count: u32,
    pub inventory_size: usize,
    pub inventory: Vec<Item>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("health {health} exceeds max health {max_health}")]
    HealthExceedsMax { health: u32, max_health: u32 },

    #[error("max health must be at least 1")]
    ZeroMaxHealth,

    #[error("level must be at least 1")]
    ZeroLevel,

    #[error("experience threshold must be at least 1")]
    ZeroThreshold,

    #[error("mana fields do not match has_mana = {has_mana}")]
    ManaMismatch { has_mana: bool },

    #[error("mana {mana} exceeds max mana {max_mana}")]
    ManaExceedsMax { mana: u32, max_mana: u32 },

    #[error("{count} items do not fit an inventory of {size}")]
    InventoryOverflow { count: usize, size: usize },
}

impl GameError for DocumentError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::HealthExceedsMax { .. } => "DOCUMENT_HEALTH_EXCEEDS_MAX",
            Self::ZeroMaxHealth => "DOCUMENT_ZERO_MAX_HEALTH",
            Self::ZeroLevel => "DOCUMENT_ZERO_LEVEL",
            Self::ZeroThreshold => "DOCUMENT_ZERO_THRESHOLD",
            Self::ManaMismatch { .. } => "DOCUMENT_MANA_MISMATCH",
            Self::ManaExceedsMax { .. } => "DOCUMENT_MANA_EXCEEDS_MAX",
            Self::InventoryOverflow { .. } => "DOCUMENT_INVENTORY_OVERFLOW",
        }
    }
}

impl PlayerDocument {
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.max_health == 0 {
            return Err(DocumentError::ZeroMaxHealth);
        }
        if self.health > self.max_health {
            return Err(DocumentError::HealthExceedsMax {
                health: self.health,
                max_health: self.max_health,
            });
        }
        if self.level == 0 {
            return Err(DocumentError::ZeroLevel);
        }
        if self.experience_to_next_level == 0 {
            return Err(DocumentError::ZeroThreshold);
        }
        match (self.has_mana, self.mana, self.max_mana) {
            (true, Some(mana), Some(max_mana)) if mana > max_mana => {
                return Err(DocumentError::ManaExceedsMax { mana, max_mana });
            }
            (true, Some(_), Some(_)) | (false, None, None) => {}
            (has_mana, _, _) => return Err(DocumentError::ManaMismatch { has_mana }),
        }
        if self.inventory.len() > self.inventory_size {
            return Err(DocumentError::InventoryOverflow {
                count: self.inventory.len(),
                size: self.inventory_size,
            });
        }
        Ok(())
    }
}

impl From<&Player> for PlayerDocument {
    fn from(player: &Player) -> Self {
        let stats = player.stats();
        let mana = player.mana();
        Self {
            name: stats.name().to_owned(),
            health: stats.health(),
            max_health: stats.max_health(),
            attack_power: stats.attack_power(),
            defense: stats.defense(),
            level: stats.level(),
            mana: mana.map(ManaPool::current),
            max_mana: mana.map(ManaPool::max),
            has_mana: mana.is_some(),
            experience: player.progression().experience(),
            experience_to_next_level: player.progression().to_next_level(),
            mana_usage_count: mana.map(ManaPool::usage_count).unwrap_or(0),
            inventory_size: player.inventory().capacity(),
            inventory: player.inventory().snapshot(),
        }
    }
}

impl TryFrom<PlayerDocument> for Player {
    type Error = DocumentError;

    fn try_from(doc: PlayerDocument) -> Result<Self, Self::Error> {
        doc.validate()?;

        let stats = CreatureStats::new(doc.name, doc.max_health, doc.attack_power)
            .with_health(doc.health)
            .with_defense(doc.defense)
            .with_level(doc.level);
        let mana = match (doc.mana, doc.max_mana) {
            (Some(current), Some(max)) => {
                Some(ManaPool::from_parts(current, max, doc.mana_usage_count))
            }
            _ => None,
        };
        let progression = Progression::from_parts(doc.experience, doc.experience_to_next_level);
        let count = doc.inventory.len();
        let inventory = Inventory::from_items(doc.inventory, doc.inventory_size).map_err(|_| {
            DocumentError::InventoryOverflow {
                count,
                size: doc.inventory_size,
            }
        })?;

        Ok(Player::new(stats, mana, progression, inventory))
    }
}
