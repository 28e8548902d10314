//! In-memory save repository implementation.

use std::collections::BTreeMap;
use std::sync::RwLock;

use game_core::PlayerDocument;

use crate::repository::traits::validate_slot;
use crate::repository::{RepositoryError, Result, SaveRepository};

/// In-memory save repository for testing and development.
///
/// Thread-safe but not persistent across process restarts.
#[derive(Default)]
pub struct InMemorySaveRepository {
    slots: RwLock<BTreeMap<String, PlayerDocument>>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &str, document: &PlayerDocument) -> Result<()> {
        validate_slot(slot)?;
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        slots.insert(slot.to_owned(), document.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<PlayerDocument>> {
        validate_slot(slot)?;
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        Ok(slots.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.slots
            .read()
            .is_ok_and(|slots| slots.contains_key(slot))
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        slots.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        Ok(slots.keys().cloned().collect())
    }
}
