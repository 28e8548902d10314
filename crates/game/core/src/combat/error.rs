//! Combat errors.

use crate::error::{ErrorSeverity, GameError};
use crate::inventory::InventoryError;

use super::encounter::EncounterState;

/// Errors raised by encounter actions. None of them consume the player's turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    /// Not enough mana for a spell.
    #[error("not enough mana: {required} needed, {available} available")]
    InsufficientMana { required: u32, available: u32 },

    /// The player has no mana pool.
    #[error("you cannot cast spells")]
    NoManaPool,

    /// Several enemies are alive and none was chosen.
    #[error("choose a target (1-{alive})")]
    TargetRequired { alive: usize },

    /// Target index does not name a living enemy.
    #[error("invalid target {index} ({alive} enemies alive)")]
    InvalidTarget { index: usize, alive: usize },

    /// Item use failed.
    #[error(transparent)]
    Item(#[from] InventoryError),

    /// Action attempted outside the player's turn.
    #[error("not the player's turn (encounter is {state})")]
    NotPlayerTurn { state: EncounterState },

    /// Encounter started with nobody to fight.
    #[error("no living enemies to fight")]
    NoEnemies,
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientMana { .. } => ErrorSeverity::Recoverable,
            Self::NoManaPool | Self::TargetRequired { .. } | Self::InvalidTarget { .. } => {
                ErrorSeverity::Validation
            }
            Self::Item(err) => err.severity(),
            Self::NotPlayerTurn { .. } | Self::NoEnemies => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientMana { .. } => "COMBAT_INSUFFICIENT_MANA",
            Self::NoManaPool => "COMBAT_NO_MANA_POOL",
            Self::TargetRequired { .. } => "COMBAT_TARGET_REQUIRED",
            Self::InvalidTarget { .. } => "COMBAT_INVALID_TARGET",
            Self::Item(err) => err.error_code(),
            Self::NotPlayerTurn { .. } => "COMBAT_NOT_PLAYER_TURN",
            Self::NoEnemies => "COMBAT_NO_ENEMIES",
        }
    }
}
