//! Repository contract for saving and loading the player.

use game_core::{Player, PlayerDocument};

use super::{RepositoryError, Result};

/// Slot written by an explicit save.
pub const PLAYER_SLOT: &str = "player";

/// Slot written after every won encounter.
pub const AUTOSAVE_SLOT: &str = "autosave";

/// Repository for player persistence, keyed by slot name.
///
/// Slot names are restricted to ASCII letters, digits, `-` and `_`.
pub trait SaveRepository: Send + Sync {
    /// Save a document, replacing any previous content of the slot.
    fn save(&self, slot: &str, document: &PlayerDocument) -> Result<()>;

    /// Load a document; `None` when the slot is empty.
    fn load(&self, slot: &str) -> Result<Option<PlayerDocument>>;

    fn exists(&self, slot: &str) -> bool;

    fn delete(&self, slot: &str) -> Result<()>;

    /// Occupied slots in sorted order.
    fn list_slots(&self) -> Result<Vec<String>>;

    fn save_player(&self, slot: &str, player: &Player) -> Result<()> {
        self.save(slot, &PlayerDocument::from(player))
    }

    /// Load and validate a player. A document that fails validation is an
    /// error; nothing is constructed from it.
    fn load_player(&self, slot: &str) -> Result<Option<Player>> {
        match self.load(slot)? {
            Some(document) => Ok(Some(Player::try_from(document)?)),
            None => Ok(None),
        }
    }
}

pub(crate) fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidSlot(slot.to_owned()))
    }
}
