//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::PlayerDocument;

use crate::repository::traits::validate_slot;
use crate::repository::{RepositoryError, Result, SaveRepository};

/// File-based implementation of SaveRepository.
///
/// Each slot is a pretty-printed JSON document `{slot}.json`. Writes go to a
/// temporary file first and are renamed into place, so a crash mid-save
/// leaves the previous content of the slot intact.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a repository rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        validate_slot(slot)?;
        Ok(self.base_dir.join(format!("{slot}.json")))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, document: &PlayerDocument) -> Result<()> {
        let path = self.slot_path(slot)?;
        let temp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(document)?;
        fs::write(&temp_path, json)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        tracing::info!(slot, path = %path.display(), "player saved");
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<PlayerDocument>> {
        let path = self.slot_path(slot)?;
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let document: PlayerDocument = serde_json::from_str(&json).map_err(|err| {
            tracing::error!(slot, %err, "corrupt save document");
            RepositoryError::Json(err)
        })?;

        tracing::info!(slot, player = %document.name, level = document.level, "player loaded");
        Ok(Some(document))
    }

    fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).is_ok_and(|path| path.exists())
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot)?;
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(slot, "save deleted");
        }
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && validate_slot(stem).is_ok()
            {
                slots.push(stem.to_owned());
            }
        }
        slots.sort_unstable();
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Archetype, GameConfig, Item, Player};

    fn repo() -> (tempfile::TempDir, FileSaveRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path().join("saves")).unwrap();
        (dir, repo)
    }

    #[test]
    fn save_then_load_player() {
        let (_dir, repo) = repo();
        let mut player = Archetype::Mage.create("Merlin", &GameConfig::default());
        player
            .inventory_mut()
            .add(Item::armor("Robe", "Silk", 2, "light"))
            .unwrap();

        repo.save_player("player", &player).unwrap();
        assert!(repo.exists("player"));
        assert_eq!(repo.load_player("player").unwrap(), Some(player));
        assert!(!repo.base_dir().join("player.json.tmp").exists());
    }

    #[test]
    fn empty_slot_loads_none() {
        let (_dir, repo) = repo();
        assert_eq!(repo.load("autosave").unwrap(), None);
        assert!(!repo.exists("autosave"));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let (_dir, repo) = repo();
        fs::write(repo.base_dir().join("player.json"), "{ not json").unwrap();
        assert!(matches!(repo.load("player"), Err(RepositoryError::Json(_))));
    }

    #[test]
    fn invalid_document_is_rejected_on_load() {
        let (_dir, repo) = repo();
        let player = Player::warrior("Conan", &GameConfig::default());
        let mut document = PlayerDocument::from(&player);
        document.health = document.max_health + 5;
        repo.save("player", &document).unwrap();

        assert!(matches!(
            repo.load_player("player"),
            Err(RepositoryError::InvalidDocument(_))
        ));
    }

    #[test]
    fn list_and_delete() {
        let (_dir, repo) = repo();
        let player = Player::warrior("Conan", &GameConfig::default());
        repo.save_player("player", &player).unwrap();
        repo.save_player("autosave", &player).unwrap();
        fs::write(repo.base_dir().join("notes.txt"), "ignored").unwrap();

        assert_eq!(repo.list_slots().unwrap(), vec!["autosave", "player"]);
        repo.delete("autosave").unwrap();
        repo.delete("autosave").unwrap();
        assert_eq!(repo.list_slots().unwrap(), vec!["player"]);
    }

    #[test]
    fn traversal_slot_is_refused() {
        let (_dir, repo) = repo();
        let player = Player::warrior("Conan", &GameConfig::default());
        assert!(matches!(
            repo.save_player("../escape", &player),
            Err(RepositoryError::InvalidSlot(_))
        ));
        assert!(!repo.exists("../escape"));
    }
}
